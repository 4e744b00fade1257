//! Forecast grid coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index pair into the provider's 5 km forecast grid
///
/// The indices are opaque to the dashboard: they come from the region table
/// and are passed through to the provider unchanged as `nx`/`ny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    nx: i32,
    ny: i32,
}

impl GridCoordinate {
    /// Create a coordinate for the static region table
    #[must_use]
    pub const fn new_unchecked(nx: i32, ny: i32) -> Self {
        Self { nx, ny }
    }

    /// The `nx` index
    #[must_use]
    pub const fn nx(&self) -> i32 {
        self.nx
    }

    /// The `ny` index
    #[must_use]
    pub const fn ny(&self) -> i32 {
        self.ny
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.nx, self.ny)
    }
}
