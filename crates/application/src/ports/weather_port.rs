//! Weather service port
//!
//! Defines the interface for weather data retrieval.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::{ForecastTable, GridCoordinate, ObservationRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather provider operations
///
/// Both calls take the current time in the provider's local timezone and
/// resolve the publication run to request from it. Each call is one request;
/// implementations do not retry.
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get the latest published observation for a grid cell
    async fn get_current_observation(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ObservationRecord, ApplicationError>;

    /// Get the latest published short-range forecast for a grid cell
    async fn get_forecast(
        &self,
        grid: GridCoordinate,
        now: NaiveDateTime,
    ) -> Result<ForecastTable, ApplicationError>;
}
