//! Record pipeline: dedup, batch, encode, write
//!
//! The pipeline owns everything downstream of the submit decision: the
//! deduplication window, the batch accumulator, the encoder with its
//! reusable byte buffer, and the output target. Exactly one thread runs
//! a pipeline at a time -- the caller under the write lock in sync mode,
//! the worker thread in async mode -- so none of this needs interior
//! locking.

use super::batch::BatchBuffer;
use super::dedup::DedupFilter;
use super::error::Result;
use super::metrics::LoggerMetrics;
use super::record::Record;
use crate::config::{DedupConfig, LoggerConfig};
use crate::encode::Encoder;
use crate::targets::Target;
use std::sync::Arc;
use std::time::Duration;

pub struct Pipeline {
    dedup: Option<DedupFilter>,
    batch: Option<BatchBuffer>,
    encoder: Encoder,
    /// Reused across records: cleared before each encode, never shrunk.
    buf: Vec<u8>,
    target: Box<dyn Target>,
    metrics: Arc<LoggerMetrics>,
}

impl Pipeline {
    pub fn new(
        config: &LoggerConfig,
        encoder: Encoder,
        target: Box<dyn Target>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            dedup: config
                .dedup
                .as_ref()
                .map(|DedupConfig { window }| DedupFilter::new(*window)),
            batch: config.batching.clone().map(BatchBuffer::new),
            encoder,
            buf: Vec::with_capacity(256),
            target,
            metrics,
        }
    }

    /// Run one record through dedup and batching, writing whatever is
    /// released. Level filtering and sampling have already happened.
    pub fn submit(&mut self, record: Record) -> Result<()> {
        if let Some(dedup) = &mut self.dedup {
            if !dedup.should_forward(&record) {
                self.metrics.record_dedup_suppressed();
                return Ok(());
            }
        }

        match &mut self.batch {
            Some(batch) => match batch.push(record) {
                Some(released) => self.write_batch(released),
                None => Ok(()),
            },
            None => self.write_one(&record),
        }
    }

    /// Release the pending batch if its timeout has fired. Driven by the
    /// worker's receive timeout in async mode and piggy-backed on the
    /// next submit or flush in sync mode.
    pub fn tick(&mut self) -> Result<()> {
        let due = self.batch.as_mut().and_then(BatchBuffer::take_if_due);
        match due {
            Some(released) => self.write_batch(released),
            None => Ok(()),
        }
    }

    /// Write out everything pending and flush the target through to the
    /// sink. Batches are released regardless of their timeout.
    pub fn flush(&mut self) -> Result<()> {
        let pending = self.batch.as_mut().map(BatchBuffer::drain);
        if let Some(released) = pending {
            self.write_batch(released)?;
        }
        self.target.flush()
    }

    /// How long the worker may sleep before a pending batch comes due.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.batch.as_ref().and_then(BatchBuffer::time_until_due)
    }

    fn write_one(&mut self, record: &Record) -> Result<()> {
        self.buf.clear();
        self.encoder.encode(record, &mut self.buf)?;
        self.target.write_record(&self.buf)?;
        self.metrics.record_written();
        Ok(())
    }

    /// Deliver a released batch in order. A record the encoder rejects is
    /// skipped rather than taking the rest of the batch down with it; the
    /// first error is reported after the batch completes.
    fn write_batch(&mut self, records: Vec<Record>) -> Result<()> {
        let mut first_err = None;
        for record in &records {
            if let Err(e) = self.write_one(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
