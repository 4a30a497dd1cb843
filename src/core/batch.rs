//! Batch accumulator for the record stream
//!
//! Records accumulate in arrival order and are released together when
//! either `batch_size` records are pending or `batch_timeout` has elapsed
//! since the oldest pending record arrived, whichever comes first. The
//! accumulator is owned by the pipeline, so appends and flushes are
//! already serialized; a record is released exactly once.

use super::record::Record;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Batching parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Flush when this many records are pending
    pub batch_size: usize,
    /// Flush when the oldest pending record is this old
    pub batch_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            batch_timeout: Duration::from_millis(100),
        }
    }
}

#[derive(Debug)]
pub struct BatchBuffer {
    config: BatchConfig,
    pending: Vec<Record>,
    oldest_arrival: Option<Instant>,
}

impl BatchBuffer {
    pub fn new(config: BatchConfig) -> Self {
        let capacity = config.batch_size;
        Self {
            config,
            pending: Vec::with_capacity(capacity),
            oldest_arrival: None,
        }
    }

    /// Append a record; returns the full batch when the size threshold or
    /// the timeout fires.
    pub fn push(&mut self, record: Record) -> Option<Vec<Record>> {
        if self.pending.is_empty() {
            self.oldest_arrival = Some(Instant::now());
        }
        self.pending.push(record);

        if self.pending.len() >= self.config.batch_size || self.timeout_elapsed() {
            Some(self.drain())
        } else {
            None
        }
    }

    /// Release the pending batch if the timeout has fired. Called on the
    /// worker's tick (async) or on the next submit/flush (sync).
    pub fn take_if_due(&mut self) -> Option<Vec<Record>> {
        if !self.pending.is_empty() && self.timeout_elapsed() {
            Some(self.drain())
        } else {
            None
        }
    }

    /// Unconditionally release everything pending (flush/shutdown path).
    pub fn drain(&mut self) -> Vec<Record> {
        self.oldest_arrival = None;
        std::mem::take(&mut self.pending)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// How long until the timeout fires, if anything is pending.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.oldest_arrival.map(|oldest| {
            self.config
                .batch_timeout
                .saturating_sub(oldest.elapsed())
        })
    }

    fn timeout_elapsed(&self) -> bool {
        self.oldest_arrival
            .is_some_and(|oldest| oldest.elapsed() >= self.config.batch_timeout)
    }
}
