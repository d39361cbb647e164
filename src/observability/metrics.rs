//! Metrics registry for pastedb
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters
///
/// Relaxed ordering is enough: counters are independent and only read
/// for reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
    queries_failed: AtomicU64,
    rows_returned: AtomicU64,
    pastes_created: AtomicU64,
    pastes_updated: AtomicU64,
    pastes_deleted: AtomicU64,
    mirror_failures: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Query metrics

    /// Records a successful query and the rows it returned
    pub fn record_query(&self, rows: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    /// Increment queries rejected during validation
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries failed in the store or projection
    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    // Write metrics

    pub fn increment_pastes_created(&self) {
        self.pastes_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pastes_updated(&self) {
        self.pastes_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pastes_deleted(&self) {
        self.pastes_deleted.fetch_add(1, Ordering::Relaxed);
    }

    // Mirror metrics

    pub fn increment_mirror_failures(&self) {
        self.mirror_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            pastes_created: self.pastes_created.load(Ordering::Relaxed),
            pastes_updated: self.pastes_updated.load(Ordering::Relaxed),
            pastes_deleted: self.pastes_deleted.load(Ordering::Relaxed),
            mirror_failures: self.mirror_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub queries_failed: u64,
    pub rows_returned: u64,
    pub pastes_created: u64,
    pub pastes_updated: u64,
    pub pastes_deleted: u64,
    pub mirror_failures: u64,
}
