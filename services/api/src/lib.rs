mod cli;
mod infra;
mod routes;
mod server;

use scar_leads::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
