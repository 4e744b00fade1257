//! Domain layer for SkyBoard
//!
//! Contains the weather vocabulary of the dashboard: regions and grid
//! coordinates, publication base times, observation records and forecast
//! tables, and the presentation lookups shared by every front end.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
