//! Port definitions
//!
//! Interfaces the application layer depends on; adapters in the
//! infrastructure layer implement them.

mod cache_port;
mod weather_port;

pub use cache_port::{CacheEntry, CacheKey, CachePort, CachePortExt, CacheStats, ttl};
pub use weather_port::WeatherPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
