//! Logging initialization
//!
//! Installs a `tracing` subscriber writing to stderr so dashboard output on
//! stdout stays machine-readable.

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Resolve the filter directive: `RUST_LOG`, then `cli_filter`, then config
fn build_filter(config: &LoggingConfig, cli_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(cli_filter.unwrap_or(&config.filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Initialize the global subscriber
///
/// `cli_filter` comes from verbosity flags and overrides the configured
/// filter, but not `RUST_LOG`. Fails if a subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
    cli_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config, cli_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!("Logging initialized");
    Ok(())
}
