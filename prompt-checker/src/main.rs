use anyhow::Result;
use clap::Parser;
use prompt_checker::cli::{run_with_config, Cli};
use prompt_checker::load_config::resolve_config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    // Logs go to stderr so stdout carries only the report.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");
    config.trace_loaded();

    let result = run_with_config(cli, config).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}
