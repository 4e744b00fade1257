//! Value Objects - Immutable, identity-less domain primitives

mod base_time;
mod endpoint;
mod geo_location;
mod grid_coordinate;
mod temperature;
mod weather_condition;

pub use base_time::{BaseTime, OBSERVATION_PUBLISH_MINUTE};
pub use endpoint::Endpoint;
pub use geo_location::GeoLocation;
pub use grid_coordinate::GridCoordinate;
pub use temperature::{MISSING_VALUE_THRESHOLD, MarkerColor, Temperature};
pub use weather_condition::WeatherCondition;
