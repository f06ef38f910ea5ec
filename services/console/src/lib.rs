mod cli;
mod infra;
mod projects;
mod review;

use talent_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
