use crate::infra::Console;
use chrono::Utc;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use talent_desk::api::HrApi;
use talent_desk::error::AppError;
use talent_desk::models::{
    CandidateId, EmployeeId, EvaluationKind, EvaluationResult, PendingCandidate,
    ResumeEvaluation, ScoreBand, VerificationQuestion,
};
use talent_desk::notice::Notice;
use talent_desk::workflows::{
    wait_for_questions, CandidateCase, CandidateList, CandidateSource, DecisionRecorder,
    EvaluationRequestor, JobStatus, QuestionStatus, ResumeFile, ResumePipeline, Searchable,
    SourceRoster,
};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive name filter
    #[arg(long)]
    pub(crate) filter: Option<String>,
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    Comprehensive,
    Quantitative,
    Qualitative,
    Domain,
}

impl From<KindArg> for EvaluationKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Comprehensive => EvaluationKind::Comprehensive,
            KindArg::Quantitative => EvaluationKind::Quantitative,
            KindArg::Qualitative => EvaluationKind::Qualitative,
            KindArg::Domain => EvaluationKind::Domain,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Employee or candidate id
    pub(crate) candidate_id: String,
    #[arg(long, value_enum, default_value_t = KindArg::Comprehensive)]
    pub(crate) kind: KindArg,
    /// Print the raw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    pub(crate) candidate_id: String,
    /// Keep polling while questions are still being generated
    #[arg(long)]
    pub(crate) wait: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ResumeSubmitArgs {
    /// PDF file to upload
    pub(crate) path: PathBuf,
    /// Add the evaluated resume to the pending queue
    #[arg(long, conflicts_with = "reject")]
    pub(crate) approve: bool,
    /// Discard the evaluated resume
    #[arg(long)]
    pub(crate) reject: bool,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Decision {
    Approve,
    Reject,
}

pub(crate) async fn run_list(source: CandidateSource, args: ListArgs) -> Result<(), AppError> {
    let console = Console::connect()?;
    let roster = source
        .load(console.api.as_ref(), console.config.review.page_size)
        .await?;

    match roster {
        SourceRoster::Registered(mut list) => {
            apply_list_args(&mut list, &args);
            print_page(&list, |employee| {
                format!(
                    "{:<10} {:<12} {:<24} {:>4.1}y  {}",
                    employee.user_id.0,
                    employee.basic_info.name,
                    employee.basic_info.role,
                    employee.basic_info.years_of_experience,
                    score_label(employee.evaluation_data.as_ref()),
                )
            });
        }
        SourceRoster::Pending(mut list) => {
            apply_list_args(&mut list, &args);
            let now = Utc::now();
            print_page(&list, |candidate| pending_line(candidate, now));
        }
        SourceRoster::Upload => {
            println!("Resume uploads have no list; use `talent-desk resume submit <file>`.");
        }
    }
    Ok(())
}

fn apply_list_args<T: Searchable>(list: &mut CandidateList<T>, args: &ListArgs) {
    if let Some(filter) = &args.filter {
        list.set_filter(filter);
    }
    list.set_page(args.page);
}

fn print_page<T, F>(list: &CandidateList<T>, line: F)
where
    T: Searchable,
    F: Fn(&T) -> String,
{
    let visible = list.visible();
    if visible.is_empty() {
        println!("No candidates match.");
    }
    for item in visible {
        println!("{}", line(item));
    }
    println!(
        "Page {}/{} ({} matches)",
        list.page(),
        list.page_count(),
        list.match_count()
    );
}

fn pending_line(candidate: &PendingCandidate, now: chrono::DateTime<Utc>) -> String {
    let waiting = candidate
        .waiting_days(now)
        .map(|days| format!("{days}d waiting"))
        .unwrap_or_else(|| "-".to_string());
    let questions = if candidate.verification_questions.is_empty() {
        "questions pending".to_string()
    } else {
        format!("{} questions", candidate.verification_questions.len())
    };
    format!(
        "{:<12} {:<12} {:<24} {:<12} {:<10} {}",
        candidate.candidate_id.0,
        candidate.basic_info.name,
        candidate.basic_info.role,
        waiting,
        score_label(candidate.evaluation_data.as_ref()),
        questions,
    )
}

fn score_label(result: Option<&EvaluationResult>) -> String {
    match result.and_then(|result| result.overall_score) {
        Some(score) => format!("{score:.1} ({})", ScoreBand::of(score).label()),
        None => "unscored".to_string(),
    }
}

pub(crate) async fn run_delete_employee(employee_id: &str) -> Result<(), AppError> {
    let console = Console::connect()?;
    let id = EmployeeId(employee_id.to_string());

    match console.api.delete_employee(&id).await {
        Ok(()) => {
            info!(employee_id = %id, "employee deleted");
            println!("{}", Notice::success(format!("Deleted employee {id}")));
            Ok(())
        }
        Err(err) => {
            println!("{}", Notice::error(format!("Could not delete {id}: {err}")));
            Err(err.into())
        }
    }
}

pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let console = Console::connect()?;
    let requestor = EvaluationRequestor::new(console.api.clone());
    let kind = EvaluationKind::from(args.kind);

    let result = match requestor.request(&args.candidate_id, kind).await {
        Ok(result) => result,
        Err(err) => {
            println!("{}", Notice::from_error(&err));
            return Err(err.into());
        }
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|err| AppError::Input(format!("could not render result: {err}")))?;
        println!("{rendered}");
    } else {
        println!("{} evaluation for {}", kind.label(), args.candidate_id);
        print_evaluation(&result);
    }
    Ok(())
}

fn print_evaluation(result: &EvaluationResult) {
    println!("  Overall: {}", score_label(Some(result)));
    for (category, score) in &result.category_scores {
        println!("  {category}: {score:.1}");
    }
    if !result.strengths.is_empty() {
        println!("  Strengths: {}", result.strengths.join("; "));
    }
    if !result.weaknesses.is_empty() {
        println!("  Weaknesses: {}", result.weaknesses.join("; "));
    }
    if let Some(analysis) = &result.analysis {
        println!("  Analysis: {analysis}");
    }
}

pub(crate) async fn run_pending_decision(
    candidate_id: &str,
    decision: Decision,
) -> Result<(), AppError> {
    let console = Console::connect()?;
    let candidate = console
        .api
        .list_pending()
        .await?
        .into_iter()
        .find(|candidate| candidate.candidate_id.0 == candidate_id)
        .ok_or_else(|| AppError::Input(format!("no pending candidate with id {candidate_id}")))?;

    let recorder = DecisionRecorder::new(console.api.clone());
    let mut case = CandidateCase::from_pending(candidate);
    let outcome = match decision {
        Decision::Approve => recorder.approve(&mut case).await,
        Decision::Reject => recorder.reject(&mut case).await,
    };

    match outcome {
        Ok(outcome) => {
            println!("{}", outcome.notice);
            Ok(())
        }
        Err(err) => {
            println!("{}", err.notice());
            Err(err.into())
        }
    }
}

pub(crate) async fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let console = Console::connect()?;
    let id = CandidateId(args.candidate_id);
    let attempts = if args.wait {
        console.config.review.poll_attempts
    } else {
        1
    };

    let status = wait_for_questions(
        console.api.as_ref(),
        &id,
        console.config.review.poll_interval,
        attempts,
    )
    .await?;

    match status {
        QuestionStatus::Ready(questions) => print_questions(&questions),
        QuestionStatus::Generating => {
            println!("{}", Notice::info(format!("Questions for {id} are still being generated.")))
        }
        QuestionStatus::Missing => {
            return Err(AppError::Input(format!("no pending candidate with id {id}")));
        }
    }
    Ok(())
}

fn print_questions(questions: &[VerificationQuestion]) {
    for (index, question) in questions.iter().enumerate() {
        println!(
            "{}. [{}] {} ({})",
            index + 1,
            question.severity.label(),
            question.question,
            question.category
        );
        if !question.reason.is_empty() {
            println!("   reason: {}", question.reason);
        }
    }
}

pub(crate) async fn run_resume_submit(args: ResumeSubmitArgs) -> Result<(), AppError> {
    let console = Console::connect()?;

    let file_name = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::Input(format!("{} has no file name", args.path.display())))?
        .to_string();
    let bytes = tokio::fs::read(&args.path).await?;
    let file = ResumeFile::new(&file_name, ResumeFile::content_type_for(&file_name), bytes)?;

    let pipeline = ResumePipeline::new(console.api.clone());
    let evaluation = pipeline.submit(file).await?;
    print_resume(&evaluation);

    let mut case = CandidateCase::upload();
    case.record_resume(evaluation)?;

    if !args.approve && !args.reject {
        println!("{}", Notice::info("No decision recorded. Re-run with --approve or --reject."));
        return Ok(());
    }

    let recorder = DecisionRecorder::new(console.api.clone());
    let outcome = if args.approve {
        recorder.approve(&mut case).await
    } else {
        recorder.reject(&mut case).await
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("{}", err.notice());
            return Err(err.into());
        }
    };
    println!("{}", outcome.notice);

    // The runtime stops with the process, so the console waits for the job.
    if let Some(job) = outcome.verification_job {
        let review = &console.config.review;
        match recorder
            .verification_jobs()
            .wait(job, review.poll_interval, review.poll_attempts)
            .await
        {
            Some(JobStatus::Completed(questions)) => print_questions(&questions),
            Some(JobStatus::Failed(message)) => println!("{}", Notice::error(message)),
            Some(JobStatus::Running) | None => println!(
                "{}",
                Notice::info(format!("{job} is still running; check `pending questions` later."))
            ),
        }
    }
    Ok(())
}

fn print_resume(evaluation: &ResumeEvaluation) {
    println!(
        "{} <{}> {} ({:.1} years, {})",
        evaluation.name,
        evaluation.email,
        evaluation.role,
        evaluation.years_of_experience,
        evaluation.department
    );
    println!(
        "  Quantitative score: {:.1} ({})",
        evaluation.quantitative_score,
        ScoreBand::of(evaluation.quantitative_score).label()
    );
    if !evaluation.qualitative_analysis.is_empty() {
        println!("  Analysis: {}", evaluation.qualitative_analysis);
    }
    for (domain, weight) in &evaluation.domain_expertise {
        println!("  {domain}: {weight:.2}");
    }
    println!("  Stored as {}", evaluation.file_key);
}
