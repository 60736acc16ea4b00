//! Edit pipeline counters
//!
//! - Counters only, monotonic
//! - Reset only when the registry is created
//! - Relaxed atomics; exactness across threads is not required

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one edit service
#[derive(Debug, Default)]
pub struct EditMetrics {
    edits_received: AtomicU64,
    edits_saved: AtomicU64,
    edits_rejected: AtomicU64,
    edits_failed: AtomicU64,
    failures_reported: AtomicU64,
    records_collected: AtomicU64,
}

impl EditMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.edits_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_collected(&self, records: usize) {
        self.records_collected
            .fetch_add(records as u64, Ordering::Relaxed);
    }

    pub fn record_saved(&self) {
        self.edits_saved.fetch_add(1, Ordering::Relaxed);
    }

    /// An edit turned away with `failures` validation messages
    pub fn record_rejected(&self, failures: usize) {
        self.edits_rejected.fetch_add(1, Ordering::Relaxed);
        self.failures_reported
            .fetch_add(failures as u64, Ordering::Relaxed);
    }

    /// An edit aborted by a structural or persistence error
    pub fn record_failed(&self) {
        self.edits_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            edits_received: self.edits_received.load(Ordering::Relaxed),
            edits_saved: self.edits_saved.load(Ordering::Relaxed),
            edits_rejected: self.edits_rejected.load(Ordering::Relaxed),
            edits_failed: self.edits_failed.load(Ordering::Relaxed),
            failures_reported: self.failures_reported.load(Ordering::Relaxed),
            records_collected: self.records_collected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub edits_received: u64,
    pub edits_saved: u64,
    pub edits_rejected: u64,
    pub edits_failed: u64,
    pub failures_reported: u64,
    pub records_collected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        assert_eq!(EditMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let metrics = EditMetrics::new();
        metrics.record_received();
        metrics.record_received();
        metrics.record_collected(3);
        metrics.record_rejected(4);
        metrics.record_saved();
        metrics.record_failed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.edits_received, 2);
        assert_eq!(snapshot.records_collected, 3);
        assert_eq!(snapshot.edits_rejected, 1);
        assert_eq!(snapshot.failures_reported, 4);
        assert_eq!(snapshot.edits_saved, 1);
        assert_eq!(snapshot.edits_failed, 1);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(EditMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_received();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.snapshot().edits_received, 800);
    }
}
