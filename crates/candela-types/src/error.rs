//! Error types for candela.

use thiserror::Error;

use crate::{TimeframeParseError, UnsupportedProvider};

/// Result type alias for candela operations.
pub type Result<T> = std::result::Result<T, CandelaError>;

/// Errors that can occur while fetching and normalizing market data.
#[derive(Error, Debug)]
pub enum CandelaError {
    /// The request cannot be served as configured (unknown provider, bad timeframe).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream call failed: non-success status, timeout, network failure,
    /// or a body that could not be decoded.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream payload does not have the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CandelaError {
    /// Returns true if the error is caller-correctable configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns true if the error came from the transport layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the error is a payload shape mismatch.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

impl From<UnsupportedProvider> for CandelaError {
    fn from(e: UnsupportedProvider) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<TimeframeParseError> for CandelaError {
    fn from(e: TimeframeParseError) -> Self {
        Self::Configuration(e.to_string())
    }
}
