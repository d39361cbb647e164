//! API error types
//!
//! API errors wrap the subsystem error and keep its code.

use thiserror::Error;

use crate::entity::EntityError;
use crate::executor::ExecutorError;
use crate::mirror::MirrorError;
use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Any failure surfaced by [`PasteService`](super::PasteService)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

impl ApiError {
    /// Returns the subsystem's error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Query(e) => e.code().code(),
            ApiError::Entity(e) => e.code(),
            ApiError::Executor(e) => e.code().code(),
            ApiError::Store(e) => e.code(),
            ApiError::Mirror(e) => e.code(),
        }
    }

    /// Returns true if the request itself was at fault
    pub fn is_client_error(&self) -> bool {
        match self {
            ApiError::Query(_) | ApiError::Entity(_) => true,
            ApiError::Executor(e) => e.store_error().is_client_error(),
            ApiError::Store(e) => e.is_client_error(),
            ApiError::Mirror(_) => false,
        }
    }
}
