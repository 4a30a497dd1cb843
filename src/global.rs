//! Process-wide default logger
//!
//! One logger instance shared by the whole process, behind a read-write
//! lock. `init` installs a configured logger (replacing and draining any
//! previous one); the module-level logging functions lazily fall back to
//! a plain Info/text/stdout logger when nothing was installed. The
//! logging macros route here.

use crate::config::LoggerConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::field::Field;
use crate::core::level::Level;
use crate::core::logger::Logger;
use crate::core::metrics::LoggerMetrics;
use parking_lot::RwLock;

static DEFAULT: RwLock<Option<Logger>> = RwLock::new(None);

/// Install the process-wide logger from a configuration.
///
/// An already-installed logger is shut down (draining its queue) and
/// replaced.
pub fn init(config: LoggerConfig) -> Result<()> {
    let logger = Logger::init(config)?;
    let previous = DEFAULT.write().replace(logger);
    if let Some(mut previous) = previous {
        previous.shutdown()?;
    }
    Ok(())
}

/// Shut down and remove the process-wide logger, draining its queue.
///
/// A no-op when nothing is installed.
pub fn shutdown() -> Result<()> {
    match DEFAULT.write().take() {
        Some(mut logger) => logger.shutdown(),
        None => Ok(()),
    }
}

/// Flush the process-wide logger.
pub fn flush() -> Result<()> {
    with_default(|logger| logger.flush())
}

/// Snapshot of the process-wide logger's counters.
pub fn metrics() -> LoggerMetrics {
    let guard = DEFAULT.read();
    match guard.as_ref() {
        Some(logger) => logger.metrics(),
        None => LoggerMetrics::new(),
    }
}

/// Emit through the process-wide logger.
pub fn log(level: Level, message: impl Into<String>) -> Result<()> {
    with_default(|logger| logger.log(level, message))
}

/// Emit through the process-wide logger with structured fields.
pub fn log_with_fields(level: Level, message: impl Into<String>, fields: &[Field]) -> Result<()> {
    with_default(|logger| logger.log_with_fields(level, message, fields))
}

pub fn debug(message: impl Into<String>) -> Result<()> {
    log(Level::Debug, message)
}

pub fn info(message: impl Into<String>) -> Result<()> {
    log(Level::Info, message)
}

pub fn warn(message: impl Into<String>) -> Result<()> {
    log(Level::Warn, message)
}

pub fn error(message: impl Into<String>) -> Result<()> {
    log(Level::Error, message)
}

pub fn fatal(message: impl Into<String>) -> Result<()> {
    log(Level::Fatal, message)
}

/// Run `f` against the installed logger, installing the lazy default
/// first when none exists.
fn with_default<F>(f: F) -> Result<()>
where
    F: FnOnce(&Logger) -> Result<()>,
{
    {
        let guard = DEFAULT.read();
        if let Some(logger) = guard.as_ref() {
            return f(logger);
        }
    }

    // Nothing installed: set up the fallback under the write lock. A
    // racing init wins; use whatever is present after the upgrade.
    let mut guard = DEFAULT.write();
    if guard.is_none() {
        *guard = Some(Logger::init(LoggerConfig::default())?);
    }
    match guard.as_ref() {
        Some(logger) => f(logger),
        None => Err(LoggerError::LoggerStopped),
    }
}
