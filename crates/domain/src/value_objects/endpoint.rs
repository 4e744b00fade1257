//! Provider endpoint identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two provider operations the dashboard uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Ultra-short-range observation of the current hour
    CurrentObservation,
    /// Short-range (village) forecast covering the next days
    ShortRangeForecast,
}

impl Endpoint {
    /// Operation name used in user-facing messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CurrentObservation => "current observation",
            Self::ShortRangeForecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_the_operation() {
        assert_eq!(Endpoint::CurrentObservation.to_string(), "current observation");
        assert_eq!(Endpoint::ShortRangeForecast.to_string(), "forecast");
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Endpoint::ShortRangeForecast).expect("serialize");
        assert_eq!(json, "\"short_range_forecast\"");
    }
}
