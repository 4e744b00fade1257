//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::{ForecastTable, GridCoordinate, ObservationRecord};
use integration_weather::{KmaClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter for the KMA short-range forecast service
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"KmaClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter backed by the KMA HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = KmaClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ClientInit(e) => ApplicationError::Internal(e),
            WeatherError::Transport { endpoint, message } => {
                ApplicationError::Transport { endpoint, message }
            },
            WeatherError::Provider { code, message } => ApplicationError::Provider { code, message },
            WeatherError::MalformedPayload { endpoint, message } => {
                ApplicationError::MalformedPayload { endpoint, message }
            },
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(nx = grid.nx(), ny = grid.ny()))]
    async fn get_current_observation(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ObservationRecord, ApplicationError> {
        let result = self
            .client
            .get_current(grid, now)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(record) => {
                debug!(
                    categories = record.len(),
                    temperature = %record.temperature(),
                    "Retrieved current observation"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current observation");
            },
        }

        result
    }

    #[instrument(skip(self), fields(nx = grid.nx(), ny = grid.ny()))]
    async fn get_forecast(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ForecastTable, ApplicationError> {
        let result = self
            .client
            .get_forecast(grid, now)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(table) => {
                debug!(days = table.len(), "Retrieved weather forecast");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather forecast");
            },
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use domain::Endpoint;

    use super::*;

    #[test]
    fn with_config_creates_adapter() {
        let adapter = WeatherAdapter::with_config(WeatherConfig::default());
        assert!(adapter.is_ok());
    }

    #[test]
    fn debug_impl() {
        let adapter = WeatherAdapter::with_config(WeatherConfig::default()).expect("adapter");
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("WeatherAdapter"));
    }

    #[test]
    fn map_error_transport() {
        let err = WeatherError::Transport {
            endpoint: Endpoint::CurrentObservation,
            message: "timeout".into(),
        };
        let app_err = WeatherAdapter::map_error(err);
        assert!(matches!(
            app_err,
            ApplicationError::Transport {
                endpoint: Endpoint::CurrentObservation,
                ..
            }
        ));
    }

    #[test]
    fn map_error_provider_keeps_code_and_message() {
        let err = WeatherError::Provider {
            code: "30".into(),
            message: "SERVICE_KEY_IS_NOT_REGISTERED_ERROR".into(),
        };
        match WeatherAdapter::map_error(err) {
            ApplicationError::Provider { code, message } => {
                assert_eq!(code, "30");
                assert_eq!(message, "SERVICE_KEY_IS_NOT_REGISTERED_ERROR");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn map_error_malformed_is_no_data() {
        let err = WeatherError::MalformedPayload {
            endpoint: Endpoint::ShortRangeForecast,
            message: "record list is empty".into(),
        };
        assert!(WeatherAdapter::map_error(err).is_no_data());
    }

    #[test]
    fn map_error_client_init() {
        let err = WeatherError::ClientInit("tls".into());
        assert!(matches!(
            WeatherAdapter::map_error(err),
            ApplicationError::Internal(_)
        ));
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WeatherAdapter>();
    }
}
