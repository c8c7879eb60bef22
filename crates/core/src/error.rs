//! Guard error model.

use thiserror::Error;

/// Result type used across the guard crates.
pub type GuardResult<T> = Result<T, GuardError>;

/// Guard-level error.
///
/// Only bootstrap problems surface as errors. Authorization denials are
/// ordinary decisions and never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The guard was used before it was fully configured (e.g. no authorizer).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A route or redirect path was malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A route table or config document could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl GuardError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
