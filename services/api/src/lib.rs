mod cli;
mod infra;
mod render;
mod routes;
mod search;
mod server;

use helper_directory::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
