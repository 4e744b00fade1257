//! In-memory TTL cache implementation
//!
//! Map from `(endpoint, grid cell)` to the serialized response and the time it
//! was written. Expiry is checked against the caller's clock on every read;
//! an expired entry is dropped when it is read.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use application::{
    error::ApplicationError,
    ports::{CacheEntry, CacheKey, CachePort, CacheStats},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, instrument};

/// In-memory cache keyed by endpoint and grid cell
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.lock().len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    #[instrument(skip(self), level = "debug", fields(key = %key))]
    async fn get_bytes(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<u8>>, ApplicationError> {
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.record(true);
                return Ok(Some(entry.value().to_vec()));
            },
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            debug!("Expired entry dropped");
        }
        self.record(false);
        Ok(None)
    }

    #[instrument(skip(self, value), level = "debug", fields(key = %key))]
    async fn set_bytes(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(), ApplicationError> {
        self.entries
            .lock()
            .insert(*key, CacheEntry::new(value, now, ttl));
        Ok(())
    }

    async fn clear(&self) -> Result<u64, ApplicationError> {
        let mut entries = self.entries.lock();
        let removed = entries.len() as u64;
        entries.clear();
        debug!(removed, "Cache cleared");
        Ok(removed)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use application::ports::CachePortExt;
    use chrono::{TimeDelta, TimeZone};
    use domain::{Endpoint, GridCoordinate};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        value: String,
        count: i32,
    }

    const TTL: Duration = Duration::from_secs(600);

    fn key() -> CacheKey {
        CacheKey::new(
            Endpoint::CurrentObservation,
            GridCoordinate::new_unchecked(89, 90),
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time")
    }

    #[tokio::test]
    async fn set_and_get_value() {
        let cache = MemoryCache::new();
        let data = TestData {
            value: "hello".to_string(),
            count: 42,
        };

        cache.set(&key(), &data, t0(), TTL).await.unwrap();

        let retrieved: Option<TestData> = cache.get(&key(), t0()).await.unwrap();
        assert_eq!(retrieved, Some(data));
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let cache = MemoryCache::new();
        let result: Option<TestData> = cache.get(&key(), t0()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_dropped_on_read() {
        let cache = MemoryCache::new();
        cache.set(&key(), &"value".to_string(), t0(), TTL).await.unwrap();

        let fresh: Option<String> = cache
            .get(&key(), t0() + TimeDelta::seconds(599))
            .await
            .unwrap();
        assert_eq!(fresh.as_deref(), Some("value"));

        let stale: Option<String> = cache
            .get(&key(), t0() + TimeDelta::seconds(600))
            .await
            .unwrap();
        assert!(stale.is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = MemoryCache::new();
        let forecast = CacheKey::new(Endpoint::ShortRangeForecast, key().grid);
        cache.set(&key(), &1, t0(), TTL).await.unwrap();
        cache.set(&forecast, &2, t0(), TTL).await.unwrap();

        assert_eq!(cache.clear().await.unwrap(), 2);
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn stats_track_hits_and_misses() {
        let cache = MemoryCache::new();
        cache.set(&key(), &"v".to_string(), t0(), TTL).await.unwrap();

        let _: Option<String> = cache.get(&key(), t0()).await.unwrap();
        let _: Option<String> = cache.get(&key(), t0()).await.unwrap();
        let _: Option<String> = cache
            .get(&CacheKey::new(Endpoint::ShortRangeForecast, key().grid), t0())
            .await
            .unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }
}
