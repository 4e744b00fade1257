//! Dashboard presentation settings.

use application::DashboardOptions;
use domain::{DEFAULT_REGION, DomainError, Region, RegionCatalog};
use serde::{Deserialize, Serialize};

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Region shown when none is given on the command line
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Number of days in the outlook (default: 3)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,

    /// `HHMM` slot each outlook card prefers (default: 1200)
    #[serde(default = "default_representative_time")]
    pub representative_time: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

const fn default_forecast_days() -> usize {
    3
}

fn default_representative_time() -> String {
    "1200".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            forecast_days: default_forecast_days(),
            representative_time: default_representative_time(),
        }
    }
}

impl DashboardConfig {
    /// Look up the configured default region
    pub fn region(&self) -> Result<&'static Region, DomainError> {
        RegionCatalog::find(&self.default_region)
    }

    /// View model options
    #[must_use]
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            forecast_days: self.forecast_days,
            representative_time: self.representative_time.clone(),
        }
    }

    /// Whether `representative_time` is a valid `HHMM` slot
    pub(crate) fn has_valid_time(&self) -> bool {
        let time = self.representative_time.as_str();
        time.len() == 4
            && time.bytes().all(|b| b.is_ascii_digit())
            && &time[..2] < "24"
            && &time[2..] < "60"
    }
}
