//! Digit Classifier Demo - Main Entry Point

use clap::Parser;
use digit_demo::{init_logging, run, Cli, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(settings.log_json);

    info!("=== Digit Demo v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Prediction service: {}", settings.api_url);

    run(cli, settings).await
}
