//! Weather service
//!
//! Read-through access to the provider's two endpoints for a region. Each
//! successful response is cached under `(endpoint, grid cell)` for its
//! endpoint's TTL; failures are returned as they are and never cached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use domain::{Endpoint, ForecastTable, ObservationRecord, Region};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CacheKey, CachePort, CachePortExt, CacheStats, WeatherPort, ttl};

/// Provider timezone used when none is configured
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

/// How long each endpoint's responses stay cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// TTL of current observations
    pub current_observation: Duration,
    /// TTL of forecasts
    pub forecast: Duration,
}

impl TtlPolicy {
    /// TTL for an endpoint
    pub const fn for_endpoint(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::CurrentObservation => self.current_observation,
            Endpoint::ShortRangeForecast => self.forecast,
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            current_observation: ttl::CURRENT_OBSERVATION,
            forecast: ttl::FORECAST,
        }
    }
}

/// Both endpoint results for one region at one moment
///
/// The two results are independent: either may fail while the other succeeds.
#[derive(Debug)]
pub struct DashboardSnapshot {
    /// Region the snapshot belongs to
    pub region: &'static Region,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
    /// `taken_at` in provider local time
    pub local_time: NaiveDateTime,
    /// Current observation
    pub current: Result<ObservationRecord, ApplicationError>,
    /// Short-range forecast
    pub forecast: Result<ForecastTable, ApplicationError>,
}

/// Weather read-through service
pub struct WeatherService {
    weather: Arc<dyn WeatherPort>,
    cache: Arc<dyn CachePort>,
    ttl: TtlPolicy,
    timezone: Tz,
    caching_enabled: bool,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .field("timezone", &self.timezone)
            .field("caching_enabled", &self.caching_enabled)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service with default TTLs in the provider's default timezone
    pub fn new(weather: Arc<dyn WeatherPort>, cache: Arc<dyn CachePort>) -> Self {
        Self {
            weather,
            cache,
            ttl: TtlPolicy::default(),
            timezone: DEFAULT_TIMEZONE,
            caching_enabled: true,
        }
    }

    /// Override the TTL policy
    #[must_use]
    pub const fn with_ttl(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the provider timezone
    #[must_use]
    pub const fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Bypass the cache entirely
    #[must_use]
    pub const fn with_caching_disabled(mut self) -> Self {
        self.caching_enabled = false;
        self
    }

    /// Convert a UTC instant to provider local time
    pub fn local_time(&self, now_utc: DateTime<Utc>) -> NaiveDateTime {
        now_utc.with_timezone(&self.timezone).naive_local()
    }

    /// Current observation for a region, served from cache while fresh
    #[instrument(skip(self, region), fields(region = region.name()))]
    pub async fn current_observation(
        &self,
        region: &Region,
        now_utc: DateTime<Utc>,
    ) -> Result<ObservationRecord, ApplicationError> {
        let grid = region.grid();
        let local = self.local_time(now_utc);
        self.read_through(Endpoint::CurrentObservation, region, now_utc, || {
            self.weather.get_current_observation(grid, local)
        })
        .await
    }

    /// Short-range forecast for a region, served from cache while fresh
    #[instrument(skip(self, region), fields(region = region.name()))]
    pub async fn forecast(
        &self,
        region: &Region,
        now_utc: DateTime<Utc>,
    ) -> Result<ForecastTable, ApplicationError> {
        let grid = region.grid();
        let local = self.local_time(now_utc);
        self.read_through(Endpoint::ShortRangeForecast, region, now_utc, || {
            self.weather.get_forecast(grid, local)
        })
        .await
    }

    /// Fetch both endpoints for a region.
    ///
    /// The forecast is requested even when the observation fails.
    pub async fn snapshot(
        &self,
        region: &'static Region,
        now_utc: DateTime<Utc>,
    ) -> DashboardSnapshot {
        let current = self.current_observation(region, now_utc).await;
        if let Err(e) = &current {
            warn!(region = region.name(), error = %e, "Current observation unavailable");
        }

        let forecast = self.forecast(region, now_utc).await;
        if let Err(e) = &forecast {
            warn!(region = region.name(), error = %e, "Forecast unavailable");
        }

        DashboardSnapshot {
            region,
            taken_at: now_utc,
            local_time: self.local_time(now_utc),
            current,
            forecast,
        }
    }

    /// Drop every cached response so the next request goes to the provider
    pub async fn refresh(&self) -> Result<u64, ApplicationError> {
        let removed = self.cache.clear().await?;
        info!(removed, "Weather cache cleared");
        Ok(removed)
    }

    /// Cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn read_through<T, F, Fut>(
        &self,
        endpoint: Endpoint,
        region: &Region,
        now_utc: DateTime<Utc>,
        fetch: F,
    ) -> Result<T, ApplicationError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, ApplicationError>> + Send,
    {
        let key = CacheKey::new(endpoint, region.grid());

        if let Some(cached) = self.get_cached::<T>(&key, now_utc).await {
            return Ok(cached);
        }

        let value = fetch().await?;
        self.store(&key, &value, now_utc).await;
        Ok(value)
    }

    async fn get_cached<T>(&self, key: &CacheKey, now_utc: DateTime<Utc>) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        if !self.caching_enabled {
            return None;
        }

        match self.cache.get::<T>(key, now_utc).await {
            Ok(Some(value)) => {
                debug!(key = %key, "Cache hit");
                Some(value)
            },
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                None
            },
            Err(e) => {
                warn!(error = %e, key = %key, "Cache read error");
                None
            },
        }
    }

    async fn store<T>(&self, key: &CacheKey, value: &T, now_utc: DateTime<Utc>)
    where
        T: Serialize + Send + Sync,
    {
        if !self.caching_enabled {
            return;
        }

        let ttl = self.ttl.for_endpoint(key.endpoint);
        if let Err(e) = self.cache.set(key, value, now_utc, ttl).await {
            warn!(error = %e, key = %key, "Cache write error");
        } else {
            debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached response");
        }
    }
}
