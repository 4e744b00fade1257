//! Domain entities - Regions, observation records and forecast tables

mod forecast_table;
mod observation;
mod region;

pub use forecast_table::{
    ForecastDay, ForecastRecord, ForecastSlot, ForecastTable, ForecastTableBuilder,
};
pub use observation::{ObservationRecord, category};
pub use region::{DEFAULT_REGION, Region, RegionCatalog};
