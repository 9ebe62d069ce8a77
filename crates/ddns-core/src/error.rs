//! Error types for the DDNS system
//!
//! This module defines all error types used throughout the crate.
//!
//! Per-attempt failures never surface as [`Error`] past the update client:
//! they are folded into [`crate::UpdateOutcome`]. `Error` covers the seams
//! (transport, parser, configuration) that produce those outcomes.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP exchange could not be completed (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The HTTP client rejected the request before sending it
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body could not be parsed into a document
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether this error means no response was obtained at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
