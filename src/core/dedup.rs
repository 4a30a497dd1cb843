//! Sliding-window deduplication filter
//!
//! Records with an identical (level, message, field sequence) fingerprint
//! are suppressed while they arrive within `window` of the last forwarded
//! occurrence. The window slides per fingerprint: each forwarded record
//! restarts that fingerprint's window.

use super::field::FieldValue;
use super::record::Record;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Entries above this count trigger an expiry sweep of the window table.
const SWEEP_THRESHOLD: usize = 1024;

/// Deduplication filter applied before batching.
///
/// Owned by the pipeline, so access is already serialized by the write
/// lock (sync path) or the worker thread (async path).
#[derive(Debug)]
pub struct DedupFilter {
    window: Duration,
    last_forwarded: HashMap<u64, Instant>,
}

impl DedupFilter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_forwarded: HashMap::new(),
        }
    }

    /// Decide whether a record is forwarded. The first occurrence of a
    /// fingerprint in a window always passes.
    pub fn should_forward(&mut self, record: &Record) -> bool {
        let fingerprint = Self::fingerprint(record);
        let now = Instant::now();

        if let Some(last) = self.last_forwarded.get(&fingerprint) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }

        self.last_forwarded.insert(fingerprint, now);
        if self.last_forwarded.len() > SWEEP_THRESHOLD {
            self.sweep(now);
        }
        true
    }

    /// Drop expired fingerprints so the table stays bounded.
    fn sweep(&mut self, now: Instant) {
        let window = self.window;
        self.last_forwarded
            .retain(|_, last| now.duration_since(*last) < window);
    }

    /// Hash of (level, message, ordered field sequence).
    fn fingerprint(record: &Record) -> u64 {
        let mut hasher = DefaultHasher::new();
        (record.level as u8).hash(&mut hasher);
        record.message.hash(&mut hasher);
        for field in &record.fields {
            field.key.hash(&mut hasher);
            match &field.value {
                FieldValue::Str(s) => {
                    0u8.hash(&mut hasher);
                    s.hash(&mut hasher);
                }
                FieldValue::Int(i) => {
                    1u8.hash(&mut hasher);
                    i.hash(&mut hasher);
                }
                FieldValue::Uint(u) => {
                    2u8.hash(&mut hasher);
                    u.hash(&mut hasher);
                }
                FieldValue::Float(f) => {
                    3u8.hash(&mut hasher);
                    f.to_bits().hash(&mut hasher);
                }
                FieldValue::Bool(b) => {
                    4u8.hash(&mut hasher);
                    b.hash(&mut hasher);
                }
            }
        }
        hasher.finish()
    }

    /// Number of tracked fingerprints (test hook)
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.last_forwarded.len()
    }
}
