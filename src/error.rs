//! Error types.
//!
//! Load failures are fatal to a session and shown to the user. Save failures
//! are logged and otherwise swallowed; the next keystroke retries implicitly.

use crate::models::Id;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Failure talking to the external notes/users service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch data from {url} : {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to fetch data from {url} : {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to decode response from {url} : {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    /// True when the service answered, just not with a success status.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

/// The session could not be loaded. Carries the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create note: {0}")]
    Create(#[source] ApiError),
    #[error("created note came back without an id")]
    MissingId,
    #[error("failed to update note {id}: {source}")]
    Update {
        id: Id,
        #[source]
        source: ApiError,
    },
}
