//! Sender metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single sender
#[derive(Debug, Default)]
pub struct SenderMetrics {
    /// Events written successfully
    write_count: AtomicU64,
    /// Events that failed to write
    failure_count: AtomicU64,
    /// Responses published on the stream
    response_count: AtomicU64,
    /// Responses dropped because the stream was full
    dropped_responses: AtomicU64,
}

impl SenderMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    pub fn inc_write_count(&self) {
        self.write_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn response_count(&self) -> u64 {
        self.response_count.load(Ordering::Relaxed)
    }

    pub fn inc_response_count(&self) {
        self.response_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dropped_responses(&self) -> u64 {
        self.dropped_responses.load(Ordering::Relaxed)
    }

    pub fn inc_dropped_responses(&self) {
        self.dropped_responses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            write_count: self.write_count(),
            failure_count: self.failure_count(),
            response_count: self.response_count(),
            dropped_responses: self.dropped_responses(),
        }
    }
}

/// Snapshot of sender metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub write_count: u64,
    pub failure_count: u64,
    pub response_count: u64,
    pub dropped_responses: u64,
}
