//! Store error types

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store cannot serve reads or writes right now
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Filter or sort names a field the entity does not declare
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// Path traverses a relation, which flat records do not have
    #[error("Unsupported path '{0}': relation traversal is not supported")]
    UnsupportedPath(String),

    /// Filter value cannot be compared with the field's type
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    /// No record with this key
    #[error("Record {0} not found")]
    NotFound(i64),

    /// A record with this key already exists
    #[error("Record {0} already exists")]
    DuplicateKey(i64),

    /// Data file could not be read or written
    #[error("I/O error: {0}")]
    Io(String),

    /// Data file content is not a valid record list
    #[error("Corrupt data file: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "PASTE_STORE_UNAVAILABLE",
            StoreError::UnknownField(_) => "PASTE_STORE_UNKNOWN_FIELD",
            StoreError::UnsupportedPath(_) => "PASTE_STORE_UNSUPPORTED_PATH",
            StoreError::InvalidValue { .. } => "PASTE_STORE_INVALID_VALUE",
            StoreError::NotFound(_) => "PASTE_NOT_FOUND",
            StoreError::DuplicateKey(_) => "PASTE_DUPLICATE_KEY",
            StoreError::Io(_) => "PASTE_STORE_IO",
            StoreError::Corrupt(_) => "PASTE_STORE_CORRUPT",
        }
    }

    /// Returns true if the caller's request caused the error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::UnknownField(_)
                | StoreError::UnsupportedPath(_)
                | StoreError::InvalidValue { .. }
                | StoreError::NotFound(_)
                | StoreError::DuplicateKey(_)
        )
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}
