//! Fleet Driving Metrics Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ServiceSettings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServiceSettings::load().context("Failed to load service settings")?;
    init_logging(settings.log_level(), settings.json_logs).context("Failed to set tracing subscriber")?;

    info!("=== Fleet Driving Metrics v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(settings).await
}
