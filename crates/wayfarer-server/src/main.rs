//! `wayfarer-server` binary.

use anyhow::Context;
use tracing::error;
use wayfarer_config::ConfigLoader;
use wayfarer_server::{app, startup, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::from_default_location().context("Failed to load configuration")?;
    telemetry::init_logging(&config.observability)?;

    startup::print_banner(&config);

    app::run(config).await.inspect_err(|e| error!("wayfarer stopped: {e:#}"))
}
