//! Current observation record and provider category codes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Temperature, WeatherCondition};

/// Provider category codes used by the dashboard
///
/// The set is open: records keep every code the provider sends, these are
/// only the ones the dashboard reads.
pub mod category {
    /// Hourly temperature (observation), °C
    pub const TEMPERATURE: &str = "T1H";
    /// Hourly temperature (forecast), °C
    pub const FORECAST_TEMPERATURE: &str = "TMP";
    /// Relative humidity, %
    pub const HUMIDITY: &str = "REH";
    /// Wind speed, m/s
    pub const WIND_SPEED: &str = "WSD";
    /// One-hour rainfall, mm
    pub const HOURLY_RAINFALL: &str = "RN1";
    /// Precipitation type code
    pub const PRECIPITATION_TYPE: &str = "PTY";
    /// Sky state code
    pub const SKY: &str = "SKY";
}

/// Category values of one observation run
///
/// Built once from a provider response and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    values: BTreeMap<String, String>,
}

impl ObservationRecord {
    /// Build a record from `(category, value)` pairs; a repeated category keeps
    /// the last value
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of a category
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&str> {
        self.values.get(category).map(String::as_str)
    }

    /// Number of categories present
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no categories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(category, value)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Observed temperature
    #[must_use]
    pub fn temperature(&self) -> Temperature {
        Temperature::parse(self.get(category::TEMPERATURE))
    }

    /// Observed relative humidity (raw value)
    #[must_use]
    pub fn humidity(&self) -> Option<&str> {
        self.get(category::HUMIDITY)
    }

    /// Observed wind speed (raw value)
    #[must_use]
    pub fn wind_speed(&self) -> Option<&str> {
        self.get(category::WIND_SPEED)
    }

    /// Observed one-hour rainfall (raw value)
    #[must_use]
    pub fn hourly_rainfall(&self) -> Option<&str> {
        self.get(category::HOURLY_RAINFALL)
    }

    /// Condition from the observed precipitation type and an externally
    /// supplied sky code (observations carry no sky state)
    #[must_use]
    pub fn condition(&self, sky: Option<&str>) -> WeatherCondition {
        WeatherCondition::from_codes(sky, self.get(category::PRECIPITATION_TYPE))
    }
}
