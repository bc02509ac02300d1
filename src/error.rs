//! Error types for Smart Assist.

use crate::transport::RequestKind;

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// A failed exchange with the backend.
///
/// Network failures, non-success statuses and malformed bodies all collapse
/// into this one shape. `reason` is diagnostic only; the timeline shows the
/// fixed per-action message instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} request failed: {reason}")]
pub struct TransportError {
    pub kind: RequestKind,
    pub reason: String,
}

impl TransportError {
    pub fn new(kind: RequestKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
