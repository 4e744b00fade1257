//! Temperature reading and map marker colour
//!
//! Provider values arrive as strings. A value that is absent, unparsable or
//! one of the provider's missing-value sentinels (`>= +900` or `<= -900`)
//! is kept as [`Temperature::Unknown`] rather than being read as zero degrees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Magnitude from which the provider marks a value as missing
pub const MISSING_VALUE_THRESHOLD: f64 = 900.0;

/// A temperature in degrees Celsius, or the absence of one
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "celsius", rename_all = "snake_case")]
pub enum Temperature {
    /// A measured or forecast value
    Known(f64),
    /// No usable value was supplied
    #[default]
    Unknown,
}

impl Temperature {
    /// Parse a provider value
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite() && v.abs() < MISSING_VALUE_THRESHOLD)
            .map_or(Self::Unknown, Self::Known)
    }

    /// The value in Celsius, if known
    #[must_use]
    pub const fn celsius(&self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unknown => None,
        }
    }

    /// Whether a value is present
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Marker colour band for this temperature
    #[must_use]
    pub fn marker_color(&self) -> MarkerColor {
        match self {
            Self::Known(v) if *v >= 30.0 => MarkerColor::Hot,
            Self::Known(v) if *v >= 20.0 => MarkerColor::Warm,
            Self::Known(v) if *v >= 10.0 => MarkerColor::Mild,
            Self::Known(v) if *v >= 0.0 => MarkerColor::Cool,
            Self::Known(_) => MarkerColor::Cold,
            Self::Unknown => MarkerColor::Unknown,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v:.1}°C"),
            Self::Unknown => write!(f, "N/A"),
        }
    }
}

/// Colour band of a map marker, derived from temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    /// 30 °C and above
    Hot,
    /// 20 °C up to 30 °C
    Warm,
    /// 10 °C up to 20 °C
    Mild,
    /// 0 °C up to 10 °C
    Cool,
    /// Below 0 °C
    Cold,
    /// No temperature available
    Unknown,
}

impl MarkerColor {
    /// Colour name used by map renderers
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "red",
            Self::Warm => "orange",
            Self::Mild => "green",
            Self::Cool => "blue",
            Self::Cold => "purple",
            Self::Unknown => "gray",
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
