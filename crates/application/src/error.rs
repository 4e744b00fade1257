//! Application-level errors

use domain::{DomainError, Endpoint};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Network error or timeout talking to the weather provider
    #[error("{endpoint} request failed: {message}")]
    Transport {
        /// Operation that failed
        endpoint: Endpoint,
        /// Underlying error text
        message: String,
    },

    /// The provider answered with a non-success result code
    #[error("Weather provider error: {message}")]
    Provider {
        /// Provider result code
        code: String,
        /// Provider-supplied message, shown to the user as is
        message: String,
    },

    /// The provider answered successfully but without usable records
    #[error("Malformed {endpoint} response: {message}")]
    MalformedPayload {
        /// Operation that failed
        endpoint: Endpoint,
        /// What was wrong with the payload
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the caller should fall back to a "no data available" state
    /// instead of reporting a failure
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }

    /// The provider operation this error belongs to, if any
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Transport { endpoint, .. } | Self::MalformedPayload { endpoint, .. } => {
                Some(*endpoint)
            },
            _ => None,
        }
    }
}
