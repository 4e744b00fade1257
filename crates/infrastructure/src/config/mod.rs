//! Application configuration
//!
//! Split into focused sub-modules:
//! - `weather`: KMA endpoint, service key, timeout, provider timezone
//! - `cache`: Response cache TTLs
//! - `dashboard`: Default region and outlook settings
//! - `logging`: Log filter
//!
//! Sources, lowest precedence first: built-in defaults, `skyboard.toml` in
//! the working directory (or an explicit file), then `SKYBOARD_*`
//! environment variables with `__` between section and key, e.g.
//! `SKYBOARD_WEATHER__SERVICE_KEY`.

mod cache;
mod dashboard;
mod logging;
mod weather;

use std::path::Path;

use application::ApplicationError;
use serde::Deserialize;
use tracing::debug;

pub use cache::CacheConfig;
pub use dashboard::DashboardConfig;
pub use logging::LoggingConfig;
pub use weather::WeatherAppConfig;

/// Default configuration file name, without extension
pub const DEFAULT_CONFIG_FILE: &str = "skyboard";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKYBOARD";

pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Dashboard configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `skyboard.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file.
    ///
    /// An explicit file must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn build(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., SKYBOARD_CACHE__ENABLED)
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Check settings that cannot be expressed by deserialization alone.
    ///
    /// Runs before any request so a missing service key is reported up front.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !self.weather.has_service_key() {
            return Err(ApplicationError::Configuration(format!(
                "weather.service_key is not set (use {ENV_PREFIX}_WEATHER__SERVICE_KEY or \
                 {DEFAULT_CONFIG_FILE}.toml)"
            )));
        }

        if self.weather.tz().is_none() {
            return Err(ApplicationError::Configuration(format!(
                "weather.timezone '{}' is not a known IANA timezone",
                self.weather.timezone
            )));
        }

        if self.weather.timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "weather.timeout_secs must be positive".to_string(),
            ));
        }

        self.dashboard.region()?;

        if self.dashboard.forecast_days == 0 {
            return Err(ApplicationError::Configuration(
                "dashboard.forecast_days must be at least 1".to_string(),
            ));
        }

        if !self.dashboard.has_valid_time() {
            return Err(ApplicationError::Configuration(format!(
                "dashboard.representative_time '{}' is not an HHMM time",
                self.dashboard.representative_time
            )));
        }

        Ok(())
    }
}
