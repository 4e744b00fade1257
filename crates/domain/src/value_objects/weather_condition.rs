//! Weather condition derived from sky and precipitation codes

use serde::{Deserialize, Serialize};

/// Dashboard weather condition
///
/// Built from the provider's precipitation type (`PTY`) and sky state (`SKY`)
/// codes. Precipitation always wins over sky state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// PTY 1
    Rain,
    /// PTY 2
    RainAndSnow,
    /// PTY 3
    Snow,
    /// PTY 4
    Shower,
    /// SKY 1
    Clear,
    /// SKY 3
    MostlyCloudy,
    /// SKY 4
    Overcast,
    /// Any other combination
    Unknown,
}

impl WeatherCondition {
    /// Resolve a condition from raw `SKY` and `PTY` code values
    #[must_use]
    pub fn from_codes(sky: Option<&str>, pty: Option<&str>) -> Self {
        match pty.map(str::trim) {
            Some("1") => return Self::Rain,
            Some("2") => return Self::RainAndSnow,
            Some("3") => return Self::Snow,
            Some("4") => return Self::Shower,
            _ => {},
        }

        match sky.map(str::trim) {
            Some("1") => Self::Clear,
            Some("3") => Self::MostlyCloudy,
            Some("4") => Self::Overcast,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Rain => "Rain",
            Self::RainAndSnow => "Rain/Snow",
            Self::Snow => "Snow",
            Self::Shower => "Shower",
            Self::Clear => "Clear",
            Self::MostlyCloudy => "Mostly cloudy",
            Self::Overcast => "Overcast",
            Self::Unknown => "No information",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Rain => "🌧️",
            Self::RainAndSnow => "🌨️",
            Self::Snow => "❄️",
            Self::Shower => "🌦️",
            Self::Clear => "☀️",
            Self::MostlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Unknown => "🌤️",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
