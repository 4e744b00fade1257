//! KMA weather client
//!
//! HTTP client for the KMA short-range forecast service.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::{BaseTime, Endpoint, ForecastTable, GridCoordinate, ObservationRecord};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ForecastItem, ObservationItem, decode_page};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// Network error, timeout or non-success HTTP status
    #[error("{endpoint} request failed: {message}")]
    Transport {
        /// Operation that failed
        endpoint: Endpoint,
        /// Underlying error text
        message: String,
    },

    /// The response envelope carried a non-success result code
    #[error("Weather provider error {code}: {message}")]
    Provider {
        /// Provider result code
        code: String,
        /// Provider-supplied message
        message: String,
    },

    /// Success envelope without the expected record list
    #[error("Malformed {endpoint} response: {message}")]
    MalformedPayload {
        /// Operation that failed
        endpoint: Endpoint,
        /// What was wrong with the payload
        message: String,
    },
}

impl WeatherError {
    pub(crate) fn transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            endpoint,
            message: message.into(),
        }
    }
}

/// Weather service configuration
#[derive(Clone, Deserialize)]
pub struct WeatherConfig {
    /// Service base URL
    /// (default: <http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// data.go.kr service key, in its decoded form
    #[serde(default = "default_service_key")]
    pub service_key: SecretString,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Records requested per page (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0".to_string()
}

fn default_service_key() -> SecretString {
    SecretString::from(String::new())
}

const fn default_timeout() -> u64 {
    10
}

const fn default_page_size() -> u32 {
    1000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            service_key: default_service_key(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Latest published observation for a grid cell.
    ///
    /// `now` is local provider time; the base time is resolved from it.
    async fn get_current(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ObservationRecord, WeatherError>;

    /// Latest published short-range forecast for a grid cell.
    ///
    /// `now` is local provider time; the base time is resolved from it.
    async fn get_forecast(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ForecastTable, WeatherError>;
}

/// KMA HTTP client implementation
#[derive(Debug)]
pub struct KmaClient {
    client: Client,
    config: WeatherConfig,
}

impl KmaClient {
    /// Create a new KMA client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ClientInit(e.to_string()))?;

        Ok(Self { client, config })
    }

    const fn operation(endpoint: Endpoint) -> &'static str {
        match endpoint {
            Endpoint::CurrentObservation => "getUltraSrtNcst",
            Endpoint::ShortRangeForecast => "getVilageFcst",
        }
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            Self::operation(endpoint)
        )
    }

    fn query_params(&self, base: &BaseTime, grid: GridCoordinate) -> Vec<(&'static str, String)> {
        vec![
            ("serviceKey", self.config.service_key.expose_secret().to_string()),
            ("pageNo", "1".to_string()),
            ("numOfRows", self.config.page_size.to_string()),
            ("dataType", "JSON".to_string()),
            ("base_date", base.base_date()),
            ("base_time", base.base_time()),
            ("nx", grid.nx().to_string()),
            ("ny", grid.ny().to_string()),
        ]
    }

    /// Issue one GET and decode the record list
    async fn fetch_items<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        base: &BaseTime,
        grid: GridCoordinate,
    ) -> Result<Vec<T>, WeatherError> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, base = %base, "Requesting {endpoint}");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(base, grid))
            .send()
            .await
            // The request URL carries the service key
            .map_err(|e| WeatherError::transport(endpoint, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::transport(endpoint, format!("HTTP {status}")));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| WeatherError::transport(endpoint, e.without_url().to_string()))?;

        let page = decode_page::<T>(endpoint, &raw)?;
        if let Some(total) = page.total_count {
            let received = page.items.len();
            if usize::try_from(total).is_ok_and(|total| total > received) {
                warn!(total, received, "{endpoint} truncated by page size");
            }
        }

        Ok(page.items)
    }
}

#[async_trait]
impl WeatherClient for KmaClient {
    #[instrument(skip(self), fields(nx = grid.nx(), ny = grid.ny()))]
    async fn get_current(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ObservationRecord, WeatherError> {
        let base = BaseTime::for_observation(now);
        let items: Vec<ObservationItem> = self
            .fetch_items(Endpoint::CurrentObservation, &base, grid)
            .await?;

        Ok(ObservationRecord::from_pairs(
            items.into_iter().map(|item| (item.category, item.obsr_value)),
        ))
    }

    #[instrument(skip(self), fields(nx = grid.nx(), ny = grid.ny()))]
    async fn get_forecast(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ForecastTable, WeatherError> {
        let base = BaseTime::for_forecast(now);
        let items: Vec<ForecastItem> = self
            .fetch_items(Endpoint::ShortRangeForecast, &base, grid)
            .await?;

        let table = ForecastTable::from_records(items.into_iter().map(Into::into));
        debug!(days = table.len(), "Forecast table built");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client() -> KmaClient {
        let config = WeatherConfig {
            service_key: SecretString::from("test-key".to_string()),
            ..Default::default()
        };
        KmaClient::new(config).expect("client creation should succeed")
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(
            config.base_url,
            "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0"
        );
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.page_size, 1000);
        assert!(config.service_key.expose_secret().is_empty());
    }

    #[test]
    fn test_config_debug_redacts_service_key() {
        let config = WeatherConfig {
            service_key: SecretString::from("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: WeatherConfig =
            serde_json::from_str(r#"{"service_key": "abc", "timeout_secs": 3}"#)
                .expect("should deserialize");
        assert_eq!(config.service_key.expose_secret(), "abc");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.page_size, 1000);
    }

    #[test]
    fn test_endpoint_url() {
        let client = client();
        assert!(
            client
                .endpoint_url(Endpoint::CurrentObservation)
                .ends_with("/VilageFcstInfoService_2.0/getUltraSrtNcst")
        );
        assert!(
            client
                .endpoint_url(Endpoint::ShortRangeForecast)
                .ends_with("/VilageFcstInfoService_2.0/getVilageFcst")
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = WeatherConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = KmaClient::new(config).expect("client creation should succeed");
        assert_eq!(
            client.endpoint_url(Endpoint::ShortRangeForecast),
            "http://localhost:8080/getVilageFcst"
        );
    }

    #[test]
    fn test_query_params() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(1, 30, 0))
            .expect("valid time");
        let base = BaseTime::for_forecast(now);
        let params = client().query_params(&base, GridCoordinate::new_unchecked(89, 90));

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("serviceKey"), Some("test-key"));
        assert_eq!(get("pageNo"), Some("1"));
        assert_eq!(get("numOfRows"), Some("1000"));
        assert_eq!(get("dataType"), Some("JSON"));
        assert_eq!(get("base_date"), Some("20231231"));
        assert_eq!(get("base_time"), Some("2300"));
        assert_eq!(get("nx"), Some("89"));
        assert_eq!(get("ny"), Some("90"));
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::transport(Endpoint::ShortRangeForecast, "timed out");
        assert_eq!(err.to_string(), "forecast request failed: timed out");

        let err = WeatherError::Provider {
            code: "30".to_string(),
            message: "SERVICE_KEY_IS_NOT_REGISTERED_ERROR".to_string(),
        };
        assert!(err.to_string().contains("SERVICE_KEY_IS_NOT_REGISTERED_ERROR"));

        let err = WeatherError::malformed(Endpoint::CurrentObservation, "record list is empty");
        assert!(err.to_string().contains("current observation"));
    }
}
