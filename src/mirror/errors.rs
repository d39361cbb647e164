//! Mirror error types

use thiserror::Error;

/// Result type for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Mirror errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    /// The form post or body read failed
    #[error("Mirror transport failed: {0}")]
    Transport(String),

    /// Response page carries no paste link, usually an unknown syntax
    #[error("Mirror response has no paste URL; check the syntax type")]
    UrlNotFound,

    /// Scrape pattern failed to compile
    #[error("Invalid scrape pattern: {0}")]
    Pattern(String),
}

impl MirrorError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            MirrorError::Transport(_) => "PASTE_MIRROR_TRANSPORT",
            MirrorError::UrlNotFound => "PASTE_MIRROR_URL_NOT_FOUND",
            MirrorError::Pattern(_) => "PASTE_MIRROR_PATTERN",
        }
    }
}
