//! Cache configuration with TTL settings.

use std::time::Duration;

use application::TtlPolicy;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL of current observations in seconds (default: 10 minutes)
    #[serde(default = "default_current_ttl")]
    pub current_ttl_secs: u64,

    /// TTL of forecasts in seconds (default: 1 hour)
    #[serde(default = "default_forecast_ttl")]
    pub forecast_ttl_secs: u64,
}

const fn default_current_ttl() -> u64 {
    10 * 60 // 10 minutes
}

const fn default_forecast_ttl() -> u64 {
    60 * 60 // 1 hour
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            current_ttl_secs: default_current_ttl(),
            forecast_ttl_secs: default_forecast_ttl(),
        }
    }
}

impl CacheConfig {
    /// TTLs as used by the weather service
    #[must_use]
    pub const fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            current_observation: Duration::from_secs(self.current_ttl_secs),
            forecast: Duration::from_secs(self.forecast_ttl_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_defaults() {
        assert_eq!(CacheConfig::default().ttl_policy(), TtlPolicy::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: CacheConfig = toml_from_str("current_ttl_secs = 60");
        assert!(config.enabled);
        assert_eq!(config.current_ttl_secs, 60);
        assert_eq!(config.forecast_ttl_secs, 3600);
    }

    fn toml_from_str(raw: &str) -> CacheConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("valid cache config")
    }
}
