//! Observable events for pastedb
//!
//! Events are explicit and typed; each maps to one stable log name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Data file loaded into the store
    StoreLoaded,
    /// Data file written
    StoreSaved,

    // Query operations
    /// Query received
    QueryReceived,
    /// Query parameters validated
    QueryValidated,
    /// Query executed and projected
    QueryExecuted,
    /// Query rejected during validation
    QueryRejected,
    /// Store or projection failed
    QueryFailed,

    // Write operations
    /// Paste inserted
    PasteCreated,
    /// Paste replaced
    PasteUpdated,
    /// Paste removed
    PasteDeleted,

    // Mirror
    /// Paste published to the mirror
    MirrorPublished,
    /// Mirror publish failed
    MirrorFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreSaved => "STORE_SAVED",

            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryValidated => "QUERY_VALIDATED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",

            Event::PasteCreated => "PASTE_CREATED",
            Event::PasteUpdated => "PASTE_UPDATED",
            Event::PasteDeleted => "PASTE_DELETED",

            Event::MirrorPublished => "MIRROR_PUBLISHED",
            Event::MirrorFailed => "MIRROR_FAILED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::QueryRejected | Event::QueryFailed | Event::MirrorFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
