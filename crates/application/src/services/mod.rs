//! Application services - Use case implementations

mod dashboard;
mod weather_service;

pub use dashboard::{
    ConditionCard, CurrentSection, DashboardOptions, DashboardView, MapMarker, Metric, NO_DATA,
    OutlookCard, OutlookSection,
};
pub use weather_service::{DEFAULT_TIMEZONE, DashboardSnapshot, TtlPolicy, WeatherService};
