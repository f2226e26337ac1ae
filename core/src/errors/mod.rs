//! Token store error types and handling.

mod types;


pub use types::{StoreError, TokenError};

/// Category of a [`TokenError`], for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    StoreUnavailable,
    MalformedStoredData,
    InvalidInput,
}

impl TokenError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::NotFound { .. } => ErrorKind::NotFound,
            TokenError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            TokenError::MalformedStoredData { .. } => ErrorKind::MalformedStoredData,
            TokenError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub type TokenResult<T> = Result<T, TokenError>;
