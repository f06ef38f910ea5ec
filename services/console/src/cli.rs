use crate::projects::{
    run_assign, run_create_project, run_dashboard, run_list_projects, run_recommend, AssignArgs,
    CreateProjectArgs, RecommendArgs,
};
use crate::review::{
    run_delete_employee, run_evaluate, run_list, run_pending_decision, run_questions,
    run_resume_submit, Decision, EvaluateArgs, ListArgs, QuestionsArgs, ResumeSubmitArgs,
};
use clap::{Parser, Subcommand};
use talent_desk::error::AppError;
use talent_desk::workflows::CandidateSource;

#[derive(Parser, Debug)]
#[command(
    name = "talent-desk",
    about = "Review candidates, record decisions and staff projects against the HR API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search or remove registered employees
    Employees {
        #[command(subcommand)]
        command: EmployeesCommand,
    },
    /// Review applicants waiting in the pending queue
    Pending {
        #[command(subcommand)]
        command: PendingCommand,
    },
    /// Request an evaluation for one candidate
    Evaluate(EvaluateArgs),
    /// Upload and evaluate resumes
    Resume {
        #[command(subcommand)]
        command: ResumeCommand,
    },
    /// List, create, staff and get staffing recommendations for projects
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    /// Print headline dashboard metrics
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum EmployeesCommand {
    /// List employees, optionally filtered by name
    List(ListArgs),
    /// Remove an employee record
    Delete { employee_id: String },
}

#[derive(Subcommand, Debug)]
enum PendingCommand {
    /// List pending candidates with their wait time
    List(ListArgs),
    /// Register a pending candidate as an employee
    Approve { candidate_id: String },
    /// Remove a pending candidate
    Reject { candidate_id: String },
    /// Show the verification questions generated for a candidate
    Questions(QuestionsArgs),
}

#[derive(Subcommand, Debug)]
enum ResumeCommand {
    /// Upload a PDF resume, evaluate it and optionally decide on it
    Submit(ResumeSubmitArgs),
}

#[derive(Subcommand, Debug)]
enum ProjectsCommand {
    /// List projects
    List,
    /// Create a project
    Create(CreateProjectArgs),
    /// Assign an employee to a project
    Assign(AssignArgs),
    /// Rank employees for a project
    Recommend(RecommendArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Employees { command } => match command {
            EmployeesCommand::List(args) => run_list(CandidateSource::Registered, args).await,
            EmployeesCommand::Delete { employee_id } => run_delete_employee(&employee_id).await,
        },
        Command::Pending { command } => match command {
            PendingCommand::List(args) => run_list(CandidateSource::PendingQueue, args).await,
            PendingCommand::Approve { candidate_id } => {
                run_pending_decision(&candidate_id, Decision::Approve).await
            }
            PendingCommand::Reject { candidate_id } => {
                run_pending_decision(&candidate_id, Decision::Reject).await
            }
            PendingCommand::Questions(args) => run_questions(args).await,
        },
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Resume {
            command: ResumeCommand::Submit(args),
        } => run_resume_submit(args).await,
        Command::Projects { command } => match command {
            ProjectsCommand::List => run_list_projects().await,
            ProjectsCommand::Create(args) => run_create_project(args).await,
            ProjectsCommand::Assign(args) => run_assign(args).await,
            ProjectsCommand::Recommend(args) => run_recommend(args).await,
        },
        Command::Dashboard => run_dashboard().await,
    }
}
