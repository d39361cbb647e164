//! Observability subsystem for pastedb
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Counters for queries and writes
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use pastedb::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::QueryExecuted, &[("rows", "5")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_query(5);
//! ```

mod events;
mod logger;
mod metrics;
mod timer;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use timer::Timer;

/// Log a lifecycle event with fields.
///
/// Failure events are logged at WARN; everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
