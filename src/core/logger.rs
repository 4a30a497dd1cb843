//! Logger facade
//!
//! `Logger` is the one public entry point for emitting records. It owns
//! the level filter and the sampler (both lock-free) and hands surviving
//! records to a [`Pipeline`]: directly under a mutex in sync mode, or
//! through a bounded crossbeam channel to a single worker thread in
//! async mode.
//!
//! Shutdown contract: `shutdown` (and `Drop`) drains every queued record
//! before releasing the target, so a clean exit never loses accepted
//! records. When the async queue is full, `log` drops the record without
//! blocking and counts the drop in the metrics.

use super::error::{LoggerError, Result};
use super::field::Field;
use super::level::Level;
use super::metrics::LoggerMetrics;
use super::pipeline::Pipeline;
use super::record::Record;
use super::sampler::Sampler;
use crate::config::{Format, LoggerConfig, TargetKind};
use crate::encode::{Encoder, TextEncoder};
use crate::targets::{ConsoleTarget, Target};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker sleep bound while no batch deadline is pending.
const IDLE_TICK: Duration = Duration::from_millis(100);

/// How long `flush` waits for the worker's acknowledgement.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

enum WorkerCommand {
    Record(Record),
    /// Flush everything pending and acknowledge on the carried channel.
    Flush(Sender<()>),
}

enum Dispatch {
    /// `None` after shutdown; dropping the pipeline closes the sink.
    Sync(Mutex<Option<Pipeline>>),
    Async {
        sender: Option<Sender<WorkerCommand>>,
        handle: Option<JoinHandle<()>>,
    },
}

/// The logging engine.
///
/// # Example
///
/// ```no_run
/// use wirelog::{Field, Level, Logger, LoggerConfig};
///
/// let mut logger = Logger::init(LoggerConfig::new().with_level(Level::Debug))?;
/// logger.info("server started")?;
/// logger.log_with_fields(
///     Level::Warn,
///     "slow query",
///     &[Field::new("duration_ms", 1250_u64)],
/// )?;
/// logger.shutdown()?;
/// # Ok::<(), wirelog::LoggerError>(())
/// ```
pub struct Logger {
    min_level: Level,
    sampler: Sampler,
    metrics: Arc<LoggerMetrics>,
    dispatch: Dispatch,
}

impl Logger {
    /// Build a logger from a validated configuration.
    ///
    /// Fails on invalid configuration, on formats or targets compiled out
    /// of this build, and on file targets whose path cannot be opened.
    pub fn init(config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let metrics = Arc::new(LoggerMetrics::new());
        let encoder = build_encoder(&config)?;
        let target = build_target(&config)?;
        let pipeline = Pipeline::new(&config, encoder, target, Arc::clone(&metrics));

        let dispatch = if config.async_io {
            let (sender, receiver) = bounded(config.buffer_size);
            let handle = thread::Builder::new()
                .name("wirelog-worker".to_string())
                .spawn(move || worker_loop(receiver, pipeline))
                .map_err(|e| {
                    LoggerError::io_operation("spawn", "Failed to start logger worker thread", e)
                })?;
            Dispatch::Async {
                sender: Some(sender),
                handle: Some(handle),
            }
        } else {
            Dispatch::Sync(Mutex::new(Some(pipeline)))
        };

        Ok(Self {
            min_level: config.level,
            sampler: Sampler::new(config.sampling_rate),
            metrics,
            dispatch,
        })
    }

    /// Emit a record without fields.
    pub fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        self.log_with_fields(level, message, &[])
    }

    /// Emit a record with structured fields.
    ///
    /// Level filtering and the sampling draw happen before any lock or
    /// queue is touched, so suppressed records cost almost nothing.
    pub fn log_with_fields(
        &self,
        level: Level,
        message: impl Into<String>,
        fields: &[Field],
    ) -> Result<()> {
        if level < self.min_level {
            return Ok(());
        }
        if !self.sampler.should_forward() {
            self.metrics.record_sampled_out();
            return Ok(());
        }

        let record = Record::new(level, message).with_fields(fields);
        match &self.dispatch {
            Dispatch::Sync(pipeline) => {
                let mut guard = pipeline.lock();
                let pipeline = guard.as_mut().ok_or(LoggerError::LoggerStopped)?;
                // Overdue batch timeouts are observed at the next call
                pipeline.tick()?;
                pipeline.submit(record)
            }
            Dispatch::Async { sender, .. } => {
                let sender = sender.as_ref().ok_or(LoggerError::LoggerStopped)?;
                match sender.try_send(WorkerCommand::Record(record)) {
                    Ok(()) => Ok(()),
                    Err(TrySendError::Full(_)) => {
                        // Queue full: drop rather than block the caller
                        self.metrics.record_queue_drop();
                        Ok(())
                    }
                    Err(TrySendError::Disconnected(_)) => Err(LoggerError::LoggerStopped),
                }
            }
        }
    }

    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Warn, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Error, message)
    }

    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Fatal, message)
    }

    /// Write out pending batches and push buffered bytes through to the
    /// sink. In async mode this waits until the worker has processed
    /// everything queued ahead of the flush.
    pub fn flush(&self) -> Result<()> {
        match &self.dispatch {
            Dispatch::Sync(pipeline) => pipeline
                .lock()
                .as_mut()
                .ok_or(LoggerError::LoggerStopped)?
                .flush(),
            Dispatch::Async { sender, .. } => {
                let sender = sender.as_ref().ok_or(LoggerError::LoggerStopped)?;
                let (ack_tx, ack_rx) = bounded(1);
                sender
                    .send(WorkerCommand::Flush(ack_tx))
                    .map_err(|_| LoggerError::LoggerStopped)?;
                ack_rx
                    .recv_timeout(FLUSH_TIMEOUT)
                    .map_err(|_| LoggerError::other("Timed out waiting for flush to complete"))
            }
        }
    }

    /// Stop the logger, draining every accepted record first and closing
    /// the sink.
    ///
    /// Idempotent. Later `log` and `flush` calls fail with
    /// [`LoggerError::LoggerStopped`] in both dispatch modes.
    pub fn shutdown(&mut self) -> Result<()> {
        match &mut self.dispatch {
            Dispatch::Sync(pipeline) => match pipeline.lock().take() {
                // The sink closes when the pipeline drops
                Some(mut pipeline) => pipeline.flush(),
                None => Ok(()),
            },
            Dispatch::Async { sender, handle } => {
                drop(sender.take());
                match handle.take() {
                    Some(handle) => handle
                        .join()
                        .map_err(|_| LoggerError::other("Logger worker thread panicked")),
                    None => Ok(()),
                }
            }
        }
    }

    /// Snapshot of the logger's counters.
    pub fn metrics(&self) -> LoggerMetrics {
        (*self.metrics).clone()
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

impl Drop for Logger {
    /// Drain and release. Dropping the sender disconnects the channel;
    /// the worker delivers everything still buffered, flushes, and exits
    /// before the join returns.
    fn drop(&mut self) {
        if let Dispatch::Async { sender, handle } = &mut self.dispatch {
            drop(sender.take());
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        } else if let Dispatch::Sync(pipeline) = &self.dispatch {
            if let Some(mut pipeline) = pipeline.lock().take() {
                let _ = pipeline.flush();
            }
        }
    }
}

fn worker_loop(receiver: Receiver<WorkerCommand>, mut pipeline: Pipeline) {
    loop {
        let timeout = pipeline.time_until_due().unwrap_or(IDLE_TICK);
        match receiver.recv_timeout(timeout) {
            Ok(WorkerCommand::Record(record)) => {
                if let Err(e) = pipeline.submit(record) {
                    eprintln!("wirelog: write failed: {}", e);
                }
            }
            Ok(WorkerCommand::Flush(ack)) => {
                if let Err(e) = pipeline.flush() {
                    eprintln!("wirelog: flush failed: {}", e);
                }
                let _ = ack.send(());
            }
            Err(RecvTimeoutError::Timeout) => {
                let _ = pipeline.tick();
            }
            // Buffered commands are all delivered before disconnection is
            // reported, so the drain is complete here.
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    if let Err(e) = pipeline.flush() {
        eprintln!("wirelog: final flush failed: {}", e);
    }
}

fn build_encoder(config: &LoggerConfig) -> Result<Encoder> {
    match config.format {
        Format::Text => {
            let on_console = matches!(config.target, TargetKind::Stdout | TargetKind::Stderr);
            Ok(Encoder::Text(
                TextEncoder::new(config.timestamp_format.clone())
                    .with_colors(config.console_colors && on_console),
            ))
        }
        Format::Json => {
            #[cfg(feature = "json")]
            {
                Ok(Encoder::Json(crate::encode::JsonEncoder::new()))
            }
            #[cfg(not(feature = "json"))]
            {
                Err(LoggerError::unavailable("format", "json"))
            }
        }
        Format::Binary => {
            #[cfg(feature = "binary")]
            {
                Ok(Encoder::Binary(crate::encode::BinaryEncoder::new()))
            }
            #[cfg(not(feature = "binary"))]
            {
                Err(LoggerError::unavailable("format", "binary"))
            }
        }
    }
}

fn build_target(config: &LoggerConfig) -> Result<Box<dyn Target>> {
    match config.target {
        TargetKind::Stdout => Ok(Box::new(ConsoleTarget::stdout())),
        TargetKind::Stderr => Ok(Box::new(ConsoleTarget::stderr())),
        TargetKind::File => {
            #[cfg(feature = "file")]
            {
                let path = config.file_path.as_ref().ok_or_else(|| {
                    LoggerError::config("LoggerConfig", "file_path is required for the file target")
                })?;
                let target = crate::targets::FileTarget::new(
                    path,
                    config.max_file_size,
                    config.max_backup_files,
                )?;
                Ok(Box::new(target))
            }
            #[cfg(not(feature = "file"))]
            {
                Err(LoggerError::unavailable("target", "file"))
            }
        }
    }
}
