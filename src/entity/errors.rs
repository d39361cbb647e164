//! Entity error types

use thiserror::Error;

/// Result type for entity operations
pub type EntityResult<T> = Result<T, EntityError>;

/// Entity errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Field name is not declared by the entity type
    #[error("Unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: &'static str, field: String },

    /// Text value exceeds the column size
    #[error("Field '{field}' is {len} characters, maximum is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl EntityError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EntityError::UnknownField { .. } => "PASTE_UNKNOWN_FIELD",
            EntityError::FieldTooLong { .. } => "PASTE_FIELD_TOO_LONG",
        }
    }
}
