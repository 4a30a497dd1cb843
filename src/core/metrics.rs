//! Logger metrics for observability
//!
//! Counters for monitoring logger health: delivered records, queue-full
//! drops in async mode, and records removed by the sampling and
//! deduplication filters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use wirelog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_queue_drop();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.queue_dropped(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records delivered to the output target
    records_written: AtomicU64,

    /// Records dropped because the async queue was full
    queue_dropped: AtomicU64,

    /// Records removed by the sampling filter
    sampled_out: AtomicU64,

    /// Records suppressed by the deduplication filter
    dedup_suppressed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            queue_dropped: AtomicU64::new(0),
            sampled_out: AtomicU64::new(0),
            dedup_suppressed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_dropped(&self) -> u64 {
        self.queue_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sampled_out(&self) -> u64 {
        self.sampled_out.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dedup_suppressed(&self) -> u64 {
        self.dedup_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_drop(&self) -> u64 {
        self.queue_dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sampled_out(&self) -> u64 {
        self.sampled_out.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dedup_suppressed(&self) -> u64 {
        self.dedup_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Queue drop rate as a percentage (0.0 - 100.0) of enqueue attempts.
    ///
    /// Returns 0.0 if nothing has been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.queue_dropped() as f64;
        let total = self.records_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.records_written.store(0, Ordering::Relaxed);
        self.queue_dropped.store(0, Ordering::Relaxed);
        self.sampled_out.store(0, Ordering::Relaxed);
        self.dedup_suppressed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metric values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            queue_dropped: AtomicU64::new(self.queue_dropped()),
            sampled_out: AtomicU64::new(self.sampled_out()),
            dedup_suppressed: AtomicU64::new(self.dedup_suppressed()),
        }
    }
}
