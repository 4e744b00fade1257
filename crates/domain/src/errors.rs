//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Region name not present in the catalog
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

impl DomainError {
    /// Create an unknown region error
    pub fn unknown_region(name: impl Into<String>) -> Self {
        Self::UnknownRegion(name.into())
    }
}
