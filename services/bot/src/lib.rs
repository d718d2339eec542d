mod cli;

use review_watch::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
