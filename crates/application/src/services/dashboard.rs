//! Dashboard view model
//!
//! Turns a [`DashboardSnapshot`] into display-ready values: metric strings,
//! the current condition card, the map marker and the daily outlook. The
//! view is plain data; rendering it as text or JSON is left to the
//! presentation layer.

use domain::{
    ForecastTable, MISSING_VALUE_THRESHOLD, ObservationRecord, Region, Temperature,
    WeatherCondition, category,
};
use serde::Serialize;

use super::weather_service::DashboardSnapshot;

/// Text shown for a metric the provider did not supply
pub const NO_DATA: &str = "no data";

/// KMA marker for "no precipitation" in rainfall fields
const NO_PRECIPITATION: &str = "강수없음";

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Number of forecast dates in the outlook
    pub forecast_days: usize,
    /// Preferred `HHMM` slot for each outlook card
    pub representative_time: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            forecast_days: 3,
            representative_time: "1200".to_string(),
        }
    }
}

/// One labelled measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Current condition summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCard {
    pub icon: &'static str,
    pub description: &'static str,
}

impl From<WeatherCondition> for ConditionCard {
    fn from(condition: WeatherCondition) -> Self {
        Self {
            icon: condition.emoji(),
            description: condition.description(),
        }
    }
}

/// Map marker for the selected region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    /// Marker colour name, from the observed temperature
    pub color: &'static str,
    pub tooltip: String,
    pub popup: Vec<String>,
}

/// Current weather block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentSection {
    Available {
        metrics: Vec<Metric>,
        rainfall_notice: Option<String>,
        condition: ConditionCard,
        marker: MapMarker,
    },
    /// The observation could not be fetched or held no records
    Unavailable { message: String, no_data: bool },
}

/// One day of the outlook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlookCard {
    /// `MM/DD`
    pub date: String,
    /// `HHMM` slot the card was built from
    pub time: String,
    pub icon: &'static str,
    pub temperature: String,
    pub description: &'static str,
}

/// Multi-day outlook block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutlookSection {
    Available { days: Vec<OutlookCard> },
    Unavailable { message: String, no_data: bool },
}

/// Everything the dashboard shows for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub region: String,
    /// Provider local time of the snapshot, `YYYY-MM-DD HH:MM`
    pub local_time: String,
    pub current: CurrentSection,
    pub outlook: OutlookSection,
}

impl DashboardView {
    /// Build the view for a snapshot
    pub fn build(snapshot: &DashboardSnapshot, options: &DashboardOptions) -> Self {
        let forecast = snapshot.forecast.as_ref().ok();

        let current = match &snapshot.current {
            Ok(record) => current_section(snapshot.region, record, forecast),
            Err(e) => CurrentSection::Unavailable {
                message: e.to_string(),
                no_data: e.is_no_data(),
            },
        };

        let outlook = match &snapshot.forecast {
            Ok(table) => OutlookSection::Available {
                days: outlook_cards(table, options),
            },
            Err(e) => OutlookSection::Unavailable {
                message: e.to_string(),
                no_data: e.is_no_data(),
            },
        };

        Self {
            region: snapshot.region.to_string(),
            local_time: snapshot.local_time.format("%Y-%m-%d %H:%M").to_string(),
            current,
            outlook,
        }
    }
}

fn current_section(
    region: &Region,
    record: &ObservationRecord,
    forecast: Option<&ForecastTable>,
) -> CurrentSection {
    // Observations carry no sky state; borrow it from the earliest forecast slot
    let sky = forecast
        .and_then(ForecastTable::first_slot)
        .and_then(|slot| slot.get(category::SKY));
    let condition = record.condition(sky);
    let temperature = record.temperature();

    let metrics = vec![
        Metric {
            label: "Temperature",
            value: measurement(record.get(category::TEMPERATURE), "°C"),
        },
        Metric {
            label: "Humidity",
            value: measurement(record.humidity(), "%"),
        },
        Metric {
            label: "Wind speed",
            value: measurement(record.wind_speed(), " m/s"),
        },
    ];

    let rainfall_notice = record
        .hourly_rainfall()
        .map(str::trim)
        .filter(|raw| is_rainfall(raw))
        .map(|raw| format!("Hourly rainfall: {raw} mm"));

    CurrentSection::Available {
        metrics,
        rainfall_notice,
        condition: condition.into(),
        marker: map_marker(region, record, temperature, condition),
    }
}

fn map_marker(
    region: &Region,
    record: &ObservationRecord,
    temperature: Temperature,
    condition: WeatherCondition,
) -> MapMarker {
    let location = region.location();
    let popup = vec![
        region.name().to_string(),
        format!("Temperature: {temperature}"),
        format!("Humidity: {}", measurement(record.humidity(), "%")),
        format!("Wind: {}", measurement(record.wind_speed(), " m/s")),
        format!("Weather: {}", condition.description()),
        format!(
            "Rainfall: {} mm",
            record.hourly_rainfall().map_or("0", str::trim)
        ),
    ];

    MapMarker {
        latitude: location.latitude(),
        longitude: location.longitude(),
        color: temperature.marker_color().as_str(),
        tooltip: format!("{} {temperature}", condition.emoji()),
        popup,
    }
}

fn outlook_cards(table: &ForecastTable, options: &DashboardOptions) -> Vec<OutlookCard> {
    table
        .days()
        .iter()
        .take(options.forecast_days)
        .filter_map(|day| {
            let slot = day.slot_or_first(&options.representative_time)?;
            let condition = WeatherCondition::from_codes(
                slot.get(category::SKY),
                slot.get(category::PRECIPITATION_TYPE),
            );
            Some(OutlookCard {
                date: month_day(day.date()),
                time: slot.time().to_string(),
                icon: condition.emoji(),
                temperature: Temperature::parse(slot.get(category::FORECAST_TEMPERATURE))
                    .to_string(),
                description: condition.description(),
            })
        })
        .collect()
}

/// Raw value with its unit, or [`NO_DATA`] for absent and sentinel values
fn measurement(raw: Option<&str>, unit: &str) -> String {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .filter(|raw| {
            !raw.parse::<f64>()
                .is_ok_and(|v| v.abs() >= MISSING_VALUE_THRESHOLD)
        })
        .map_or_else(|| NO_DATA.to_string(), |raw| format!("{raw}{unit}"))
}

fn is_rainfall(raw: &str) -> bool {
    match raw.parse::<f64>() {
        Ok(v) => v > 0.0 && v < MISSING_VALUE_THRESHOLD,
        Err(_) => !raw.is_empty() && raw != NO_PRECIPITATION,
    }
}

/// `YYYYMMDD` to `MM/DD`; anything else is shown unchanged
fn month_day(date: &str) -> String {
    match (date.len(), date.get(4..6), date.get(6..8)) {
        (8, Some(month), Some(day)) => format!("{month}/{day}"),
        _ => date.to_string(),
    }
}
