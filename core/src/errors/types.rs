//! Error type definitions for the token store
//!
//! `StoreError` is reported by key-value store backends. `TokenError` is the
//! taxonomy surfaced by the token service; store failures are folded into
//! its `StoreUnavailable` variant.

use thiserror::Error;

use rt_shared::validation::{ValidationError, ValidationErrors};

/// Errors reported by a key-value store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection error: {message}")]
    Connection { message: String },

    #[error("Store command failed: {message}")]
    Command { message: String },

    #[error("Store did not respond within {seconds}s")]
    Timeout { seconds: u64 },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}

/// Errors reported by the token service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No key matches the requested app/type/token (or the value vanished)
    #[error("Token not found (app: {app}, type: {token_type})")]
    NotFound { app: String, token_type: String },

    /// The store call failed or was not acknowledged
    #[error("Token store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The stored value is not a JSON object
    #[error("Malformed data stored under '{key}': {message}")]
    MalformedStoredData { key: String, message: String },

    /// A key segment is empty or would corrupt the composite key
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl TokenError {
    pub fn not_found(app: &str, token_type: &str) -> Self {
        Self::NotFound {
            app: app.to_string(),
            token_type: token_type.to_string(),
        }
    }
}

impl From<ValidationError> for TokenError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput {
            field: error.field,
            message: error.message,
        }
    }
}

impl From<ValidationErrors> for TokenError {
    fn from(errors: ValidationErrors) -> Self {
        match errors.first() {
            Some(error) => error.clone().into(),
            None => Self::InvalidInput {
                field: "request".to_string(),
                message: "validation failed".to_string(),
            },
        }
    }
}
