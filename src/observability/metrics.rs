//! Operation counters for infoshare
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Atomic, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of operation counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Records persisted by create
    records_created: AtomicU64,
    /// Creates that failed for any reason
    creates_rejected: AtomicU64,
    /// Successful reads by id
    reads_served: AtomicU64,
    /// Reads that returned NotFound
    reads_missed: AtomicU64,
    /// Successful attribute queries
    queries_executed: AtomicU64,
    /// Attribute queries that failed
    queries_failed: AtomicU64,
    /// Total envelopes returned by queries
    records_returned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_records_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_creates_rejected(&self) {
        self.creates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads_served(&self) {
        self.reads_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads_missed(&self) {
        self.reads_missed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful query and the number of envelopes it returned
    pub fn record_query(&self, returned: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.records_returned
            .fetch_add(returned as u64, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            creates_rejected: self.creates_rejected.load(Ordering::Relaxed),
            reads_served: self.reads_served.load(Ordering::Relaxed),
            reads_missed: self.reads_missed.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            records_returned: self.records_returned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub creates_rejected: u64,
    pub reads_served: u64,
    pub reads_missed: u64,
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub records_returned: u64,
}

impl MetricsSnapshot {
    /// Renders the snapshot as log fields
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("records_created", self.records_created.to_string()),
            ("creates_rejected", self.creates_rejected.to_string()),
            ("reads_served", self.reads_served.to_string()),
            ("reads_missed", self.reads_missed.to_string()),
            ("queries_executed", self.queries_executed.to_string()),
            ("queries_failed", self.queries_failed.to_string()),
            ("records_returned", self.records_returned.to_string()),
        ]
    }
}
