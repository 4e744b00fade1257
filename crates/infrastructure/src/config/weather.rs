//! Weather provider configuration.

use chrono_tz::Tz;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// KMA service configuration
#[derive(Clone, Deserialize)]
pub struct WeatherAppConfig {
    /// Service base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// data.go.kr service key (decoded form)
    ///
    /// Usually supplied through `SKYBOARD_WEATHER__SERVICE_KEY`.
    #[serde(default = "default_service_key")]
    pub service_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Records requested per call
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// IANA timezone the provider's base times are expressed in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .field("timezone", &self.timezone)
            .finish()
    }
}

fn default_weather_base_url() -> String {
    "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0".to_string()
}

fn default_service_key() -> SecretString {
    SecretString::from(String::new())
}

const fn default_weather_timeout() -> u64 {
    10
}

const fn default_page_size() -> u32 {
    1000
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            service_key: default_service_key(),
            timeout_secs: default_weather_timeout(),
            page_size: default_page_size(),
            timezone: default_timezone(),
        }
    }
}

impl WeatherAppConfig {
    /// Whether a service key has been supplied
    #[must_use]
    pub fn has_service_key(&self) -> bool {
        !self.service_key.expose_secret().trim().is_empty()
    }

    /// Parsed provider timezone
    #[must_use]
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    /// Client configuration for the KMA integration
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            service_key: SecretString::from(self.service_key.expose_secret().trim().to_string()),
            timeout_secs: self.timeout_secs,
            page_size: self.page_size,
        }
    }
}
