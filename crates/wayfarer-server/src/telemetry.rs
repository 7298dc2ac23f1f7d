//! Logging bootstrap.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wayfarer_config::{LogFormat, ObservabilityConfig};

/// Builds the filter: `RUST_LOG` wins, otherwise the configured level
/// with HTTP tracing at debug.
fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},wayfarer={level},tower_http=debug,sqlx=warn",
            level = config.log_level
        ))
    })
}

/// Installs the global subscriber, JSON or pretty per configuration.
pub fn init_logging(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(json.then(|| fmt::layer().json().with_current_span(false)))
        .with((!json).then(|| fmt::layer().with_target(true)))
        .try_init()?;

    Ok(())
}

