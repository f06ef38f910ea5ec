use crate::infra::{parse_date, Console};
use chrono::NaiveDate;
use clap::Args;
use std::str::FromStr;
use talent_desk::api::HrApi;
use talent_desk::error::AppError;
use talent_desk::models::{
    AssignmentRequest, Project, ProjectDraft, Recommendation, RecommendationPriority,
    RecommendationRequest, ScoreBand, TechStack,
};
use talent_desk::notice::Notice;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct CreateProjectArgs {
    #[arg(long)]
    pub(crate) name: String,
    /// Client industry, e.g. Finance or Healthcare
    #[arg(long)]
    pub(crate) industry: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: NaiveDate,
    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: NaiveDate,
    #[arg(long)]
    pub(crate) budget: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Backend technology; repeat for several
    #[arg(long = "backend")]
    pub(crate) backend: Vec<String>,
    /// Frontend technology; repeat for several
    #[arg(long = "frontend")]
    pub(crate) frontend: Vec<String>,
    /// Required skill or qualification; repeat for several
    #[arg(long = "requirement")]
    pub(crate) requirements: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AssignArgs {
    pub(crate) project_id: String,
    #[arg(long)]
    pub(crate) employee: String,
    #[arg(long)]
    pub(crate) role: String,
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: NaiveDate,
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Share of the employee's time, in percent
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub(crate) allocation: u8,
    #[arg(long)]
    pub(crate) reason: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    pub(crate) project_id: String,
    /// Required skill; repeat for several. Defaults to the project's stack.
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub(crate) team_size: u32,
    /// skill, affinity or balanced
    #[arg(long, default_value = "balanced", value_parser = RecommendationPriority::from_str)]
    pub(crate) priority: RecommendationPriority,
    /// Print the engine's reasoning under each candidate
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) async fn run_list_projects() -> Result<(), AppError> {
    let console = Console::connect()?;
    let projects = console.api.list_projects().await?;

    if projects.is_empty() {
        println!("No projects registered.");
    }
    for project in &projects {
        println!("{}", project_line(project));
    }
    Ok(())
}

fn project_line(project: &Project) -> String {
    let period = project
        .period
        .as_ref()
        .map(|period| format!("{} ~ {}", period.start, period.end))
        .unwrap_or_else(|| "-".to_string());
    let stack = project.tech_stack.all().collect::<Vec<_>>().join(", ");
    format!(
        "{:<10} {:<28} {:<12} {:<25} {:<10} {}",
        project.project_id,
        project.project_name,
        project.client_industry,
        period,
        project.status.as_deref().unwrap_or("-"),
        stack
    )
}

pub(crate) async fn run_create_project(args: CreateProjectArgs) -> Result<(), AppError> {
    if args.end < args.start {
        return Err(AppError::Input(
            "project end date must not precede its start date".to_string(),
        ));
    }

    let console = Console::connect()?;
    let mut draft = ProjectDraft::new(&args.name, &args.industry, args.start, args.end);
    draft.budget_scale = args.budget;
    draft.description = args.description;
    draft.tech_stack = TechStack {
        backend: args.backend,
        frontend: args.frontend,
        ..TechStack::default()
    };
    draft.requirements = args.requirements;

    let project = console.api.create_project(&draft).await?;
    info!(project_id = %project.project_id, "project created");
    println!(
        "{}",
        Notice::success(format!(
            "Created project {} ({}, {} months)",
            project.project_id, draft.project_name, draft.period.duration_months
        ))
    );
    Ok(())
}

pub(crate) async fn run_assign(args: AssignArgs) -> Result<(), AppError> {
    if matches!(args.end, Some(end) if end < args.start) {
        return Err(AppError::Input(
            "assignment end date must not precede its start date".to_string(),
        ));
    }

    let console = Console::connect()?;
    let request = AssignmentRequest {
        employee_id: args.employee,
        role: args.role,
        start_date: args.start,
        end_date: args.end,
        allocation_rate: args.allocation,
        assignment_reason: args.reason,
    };

    let assignment = console.api.assign_project(&args.project_id, &request).await?;
    info!(project_id = %args.project_id, employee_id = %request.employee_id, "employee assigned");
    println!(
        "{}",
        Notice::success(format!(
            "Assigned {} to {} as {} ({}%)",
            assignment
                .employee_name
                .as_deref()
                .unwrap_or(&request.employee_id),
            assignment
                .project_name
                .as_deref()
                .unwrap_or(&args.project_id),
            request.role,
            request.allocation_rate
        ))
    );
    Ok(())
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let console = Console::connect()?;
    let request = RecommendationRequest {
        project_id: args.project_id,
        required_skills: args.skills,
        team_size: args.team_size,
        priority: args.priority,
    };

    let ranked = console.api.recommend(&request).await?;
    info!(
        project_id = %request.project_id,
        priority = request.priority.label(),
        count = ranked.len(),
        "recommendations received"
    );

    if ranked.is_empty() {
        println!(
            "{}",
            Notice::info(format!("No candidates recommended for {}.", request.project_id))
        );
        return Ok(());
    }
    for (rank, recommendation) in ranked.iter().enumerate() {
        println!("{}", recommendation_line(rank + 1, recommendation));
        if args.explain && !recommendation.reasoning.is_empty() {
            println!("    {}", recommendation.reasoning);
        }
    }
    Ok(())
}

fn recommendation_line(rank: usize, recommendation: &Recommendation) -> String {
    let availability = match recommendation.availability.as_deref() {
        Some(_) if recommendation.is_available() => "available".to_string(),
        Some(status) => match recommendation.current_project.as_deref() {
            Some(project) => format!("{} ({project})", status.to_ascii_lowercase()),
            None => status.to_ascii_lowercase(),
        },
        None => "-".to_string(),
    };
    format!(
        "{rank:>2}. {:<10} {:<12} {:<22} {:>5.1} {:<8} {:<18} {}",
        recommendation.user_id,
        recommendation.name,
        recommendation.role,
        recommendation.overall_score,
        format!("({})", ScoreBand::of(recommendation.overall_score).label()),
        availability,
        recommendation.matched_skills.join(", ")
    )
}

pub(crate) async fn run_dashboard() -> Result<(), AppError> {
    let console = Console::connect()?;
    let metrics = console.api.dashboard_metrics().await?;
    for line in metrics.summary_lines() {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_desk::models::ProjectPeriod;

    #[test]
    fn recommendation_line_shows_band_availability_and_skills() {
        let busy = Recommendation {
            user_id: "U_0042".to_string(),
            name: "김민수".to_string(),
            role: "Backend Developer".to_string(),
            overall_score: 87.4,
            matched_skills: vec!["Java".to_string(), "Spring".to_string()],
            availability: Some("Busy".to_string()),
            current_project: Some("PRJ007".to_string()),
            ..Recommendation::default()
        };

        let line = recommendation_line(1, &busy);

        assert!(line.starts_with(" 1. U_0042"));
        assert!(line.contains("87.4 (strong)"));
        assert!(line.contains("busy (PRJ007)"));
        assert!(line.ends_with("Java, Spring"));

        let free = Recommendation {
            availability: Some("Available".to_string()),
            overall_score: 64.0,
            ..busy
        };
        let line = recommendation_line(2, &free);
        assert!(line.contains("64.0 (weak)"));
        assert!(line.contains("available"));
        assert!(!line.contains("PRJ007"));
    }

    #[test]
    fn project_line_lists_period_and_stack() {
        let project = Project {
            project_id: "PRJ001".to_string(),
            project_name: "차세대 뱅킹".to_string(),
            client_industry: "Finance".to_string(),
            period: Some(ProjectPeriod {
                start: "2025-01-06".to_string(),
                end: "2025-06-30".to_string(),
                duration_months: 6.0,
            }),
            tech_stack: TechStack {
                backend: vec!["Java".to_string()],
                infra: vec!["AWS".to_string()],
                ..TechStack::default()
            },
            ..Project::default()
        };

        let line = project_line(&project);

        assert!(line.contains("2025-01-06 ~ 2025-06-30"));
        assert!(line.ends_with("Java, AWS"));
    }
}
