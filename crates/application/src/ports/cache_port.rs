//! Cache port definition
//!
//! Read-through cache for provider responses. Entries are keyed by
//! `(endpoint, grid cell)`, carry the time they were stored and expire purely
//! by age. Callers pass the current time explicitly so expiry is
//! deterministic under test.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Endpoint, GridCoordinate};

use crate::error::ApplicationError;

/// Cache key: one provider operation for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Provider operation
    pub endpoint: Endpoint,
    /// Grid cell the response belongs to
    pub grid: GridCoordinate,
}

impl CacheKey {
    /// Create a key
    pub const fn new(endpoint: Endpoint, grid: GridCoordinate) -> Self {
        Self { endpoint, grid }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.endpoint {
            Endpoint::CurrentObservation => "current",
            Endpoint::ShortRangeForecast => "forecast",
        };
        write!(f, "{prefix}:{}:{}", self.grid.nx(), self.grid.ny())
    }
}

/// A stored value with the time it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    value: Vec<u8>,
    stored_at: DateTime<Utc>,
    ttl: Duration,
}

impl CacheEntry {
    /// Create an entry written at `stored_at`
    pub const fn new(value: Vec<u8>, stored_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            stored_at,
            ttl,
        }
    }

    /// Serialized value
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// When the entry was written
    pub const fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    /// Whether the entry is older than its TTL at `now`.
    ///
    /// An entry whose age equals the TTL is expired. A clock that moved
    /// backwards yields a negative age, which keeps the entry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.stored_at);
        age.to_std().is_ok_and(|age| age >= self.ttl)
    }
}

/// Cache port for storing and retrieving cached values
///
/// Values are stored as raw bytes - callers handle serialization.
#[async_trait]
pub trait CachePort: Send + Sync + fmt::Debug {
    /// Get a cached value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired at `now`.
    async fn get_bytes(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<u8>>, ApplicationError>;

    /// Store a value written at `now` with a time-to-live
    ///
    /// If the key already exists, its value and TTL are replaced.
    async fn set_bytes(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(), ApplicationError>;

    /// Drop every entry, returning how many were removed
    async fn clear(&self) -> Result<u64, ApplicationError>;

    /// Get cache statistics (hits, misses, size)
    fn stats(&self) -> CacheStats;
}

/// Extension trait for typed cache operations
///
/// Provides convenient typed get/set methods on top of the raw byte interface.
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Get a typed value from cache
    async fn get<T>(&self, key: &CacheKey, now: DateTime<Utc>) -> Result<Option<T>, ApplicationError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.get_bytes(key, now).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes).map_err(|e| {
                    ApplicationError::Internal(format!("Cache deserialization error: {e}"))
                })?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in cache
    async fn set<T>(
        &self,
        key: &CacheKey,
        value: &T,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(), ApplicationError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ApplicationError::Internal(format!("Cache serialization error: {e}")))?;
        self.set_bytes(key, bytes, now, ttl).await
    }
}

// Blanket implementation for all CachePort implementors
impl<T: CachePort + ?Sized> CachePortExt for T {}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (absent or expired)
    pub misses: u64,
    /// Current number of stored entries, expired ones included
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            // Precision loss is acceptable for statistics display
            self.hits as f64 / total as f64
        }
    }
}

/// Default TTL values per endpoint
pub mod ttl {
    use std::time::Duration;

    /// Current observation (10 minutes)
    pub const CURRENT_OBSERVATION: Duration = Duration::from_secs(10 * 60);

    /// Short-range forecast (1 hour)
    pub const FORECAST: Duration = Duration::from_secs(60 * 60);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, second)
            .single()
            .expect("valid time")
    }

    #[test]
    fn entry_is_fresh_before_ttl() {
        let entry = CacheEntry::new(vec![1], at(0, 0), ttl::CURRENT_OBSERVATION);
        assert!(!entry.is_expired(at(0, 0)));
        assert!(!entry.is_expired(at(9, 59)));
    }

    #[test]
    fn entry_expires_at_ttl() {
        let entry = CacheEntry::new(vec![1], at(0, 0), ttl::CURRENT_OBSERVATION);
        assert!(entry.is_expired(at(10, 0)));
        assert!(entry.is_expired(at(59, 0)));
    }

    #[test]
    fn clock_going_backwards_keeps_entry() {
        let entry = CacheEntry::new(vec![1], at(30, 0), ttl::CURRENT_OBSERVATION);
        assert!(!entry.is_expired(at(0, 0)));
    }

    #[test]
    fn cache_key_display() {
        let key = CacheKey::new(
            Endpoint::ShortRangeForecast,
            GridCoordinate::new_unchecked(89, 90),
        );
        assert_eq!(key.to_string(), "forecast:89:90");
    }

    #[test]
    fn keys_differ_per_endpoint() {
        let grid = GridCoordinate::new_unchecked(60, 127);
        assert_ne!(
            CacheKey::new(Endpoint::CurrentObservation, grid),
            CacheKey::new(Endpoint::ShortRangeForecast, grid)
        );
    }

    #[test]
    fn cache_stats_hit_rate_zero_when_empty() {
        let stats = CacheStats::default();
        assert!(stats.hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn cache_stats_hit_rate_calculates_correctly() {
        let stats = CacheStats {
            hits: 75,
            misses: 25,
            entries: 2,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn ttl_values_match_refresh_cadence() {
        assert_eq!(ttl::CURRENT_OBSERVATION.as_secs(), 600);
        assert_eq!(ttl::FORECAST.as_secs(), 3600);
    }
}
