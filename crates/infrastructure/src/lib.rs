//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the KMA weather
//! adapter and the in-memory TTL cache. Also owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use cache::MemoryCache;
pub use config::{AppConfig, CacheConfig, DashboardConfig, LoggingConfig, WeatherAppConfig};
pub use telemetry::{TelemetryError, init_logging};
