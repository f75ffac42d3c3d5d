mod cli;
mod commands;
mod constants;
mod error;
mod models;
mod services;
mod utils;
mod worker;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    cli::run().await;
}
