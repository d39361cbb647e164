//! Executor error types
//!
//! Error codes:
//! - PASTE_STORE_UNAVAILABLE (ERROR)
//! - PASTE_STORE_REJECTED (ERROR)
//!
//! The executor never retries. Store errors are wrapped unchanged and
//! exposed through `store_error()`.

use std::fmt;

use crate::store::StoreError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation failed but system is healthy
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Store could not serve the read
    PasteStoreUnavailable,
    /// Store refused the query (unknown field, bad value, ...)
    PasteStoreRejected,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::PasteStoreUnavailable => "PASTE_STORE_UNAVAILABLE",
            ExecutorErrorCode::PasteStoreRejected => "PASTE_STORE_REJECTED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    source: StoreError,
}

impl ExecutorError {
    /// Wraps a store error
    pub fn store(source: StoreError) -> Self {
        let code = match source {
            StoreError::Unavailable(_) | StoreError::Io(_) | StoreError::Corrupt(_) => {
                ExecutorErrorCode::PasteStoreUnavailable
            }
            _ => ExecutorErrorCode::PasteStoreRejected,
        };
        Self { code, source }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the store error as reported
    pub fn store_error(&self) -> &StoreError {
        &self.source
    }

    /// Consumes the error, returning the store error
    pub fn into_store_error(self) -> StoreError {
        self.source
    }

    /// Returns true if the store was unavailable
    pub fn is_unavailable(&self) -> bool {
        self.code == ExecutorErrorCode::PasteStoreUnavailable
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.source
        )
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<StoreError> for ExecutorError {
    fn from(e: StoreError) -> Self {
        Self::store(e)
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
