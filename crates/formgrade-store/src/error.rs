//! Store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing forms and responses.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No form with the given identifier exists.
    #[error("form not found: {0}")]
    FormNotFound(String),

    /// An identifier cannot be used as a storage key.
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),

    /// Reading or writing the backing files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns `true` if the error means the record simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::FormNotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
