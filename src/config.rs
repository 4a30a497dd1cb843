//! Logger configuration
//!
//! `LoggerConfig` is immutable after construction: `Logger::init` takes it
//! by value, validates it, and wires the engine from it. Configuration
//! loading (environment, JSON files, hot reload) is an external concern;
//! this module only defines the finished structure and its invariants.

use crate::core::batch::BatchConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::level::Level;
use crate::core::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Wire format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
    Binary,
}

impl Format {
    pub fn to_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
            Format::Binary => "binary",
        }
    }
}

/// Output target selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Stdout,
    Stderr,
    File,
}

impl TargetKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            TargetKind::Stdout => "stdout",
            TargetKind::Stderr => "stderr",
            TargetKind::File => "file",
        }
    }
}

/// Deduplication parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Suppression window per (level, message, fields) fingerprint
    pub window: Duration,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(10),
        }
    }
}

/// Complete logger configuration
///
/// # Example
///
/// ```
/// use wirelog::{Format, Level, LoggerConfig, TargetKind};
///
/// let config = LoggerConfig::new()
///     .with_level(Level::Debug)
///     .with_format(Format::Json)
///     .with_target(TargetKind::Stderr)
///     .with_sampling_rate(0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum level; strictly-lower levels are suppressed
    pub level: Level,
    pub format: Format,
    pub target: TargetKind,
    /// Required when `target` is `File`
    pub file_path: Option<PathBuf>,
    /// Rotation threshold in bytes for the file target
    pub max_file_size: u64,
    /// Bound on rotation fan-out; 0 keeps no backups
    pub max_backup_files: usize,
    /// Route records through the background worker
    pub async_io: bool,
    /// Async queue capacity in records
    pub buffer_size: usize,
    /// Forward probability, `0.0..=1.0`
    pub sampling_rate: f64,
    pub batching: Option<BatchConfig>,
    pub dedup: Option<DedupConfig>,
    pub timestamp_format: TimestampFormat,
    /// ANSI-color the level token (text format on console targets only)
    pub console_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Text,
            target: TargetKind::Stdout,
            file_path: None,
            max_file_size: 10 * 1024 * 1024,
            max_backup_files: 5,
            async_io: false,
            buffer_size: 1024,
            sampling_rate: 1.0,
            batching: None,
            dedup: None,
            timestamp_format: TimestampFormat::default(),
            console_colors: false,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    /// Select the file target at the given path
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = TargetKind::File;
        self.file_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_max_backup_files(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }

    /// Enable the async dispatch path with the given queue capacity
    #[must_use]
    pub fn with_async_io(mut self, buffer_size: usize) -> Self {
        self.async_io = true;
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn with_sampling_rate(mut self, rate: f64) -> Self {
        self.sampling_rate = rate;
        self
    }

    #[must_use]
    pub fn with_batching(mut self, batch_size: usize, batch_timeout: Duration) -> Self {
        self.batching = Some(BatchConfig {
            batch_size,
            batch_timeout,
        });
        self
    }

    #[must_use]
    pub fn with_dedup(mut self, window: Duration) -> Self {
        self.dedup = Some(DedupConfig { window });
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    /// Validate the configuration, including capability checks for
    /// formats and targets compiled out of this build. Violations are
    /// construction errors; nothing is silently downgraded.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sampling_rate) || self.sampling_rate.is_nan() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!(
                    "sampling_rate must be within 0.0..=1.0, got {}",
                    self.sampling_rate
                ),
            ));
        }

        if self.async_io && self.buffer_size == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "buffer_size must be greater than zero when async_io is enabled",
            ));
        }

        if let Some(batching) = &self.batching {
            if batching.batch_size == 0 {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "batch_size must be greater than zero when batching is enabled",
                ));
            }
        }

        match self.format {
            Format::Text => {}
            Format::Json => {
                if !cfg!(feature = "json") {
                    return Err(LoggerError::unavailable("format", "json"));
                }
            }
            Format::Binary => {
                if !cfg!(feature = "binary") {
                    return Err(LoggerError::unavailable("format", "binary"));
                }
            }
        }

        match self.target {
            TargetKind::Stdout | TargetKind::Stderr => {}
            TargetKind::File => {
                if !cfg!(feature = "file") {
                    return Err(LoggerError::unavailable("target", "file"));
                }
                if self.file_path.is_none() {
                    return Err(LoggerError::config(
                        "LoggerConfig",
                        "file_path is required when target is 'file'",
                    ));
                }
                if self.max_file_size == 0 {
                    return Err(LoggerError::config(
                        "LoggerConfig",
                        "max_file_size must be greater than zero for the file target",
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_sampling_rate_bounds() {
        assert!(LoggerConfig::new()
            .with_sampling_rate(0.0)
            .validate()
            .is_ok());
        assert!(LoggerConfig::new()
            .with_sampling_rate(1.0)
            .validate()
            .is_ok());
        assert!(LoggerConfig::new()
            .with_sampling_rate(1.5)
            .validate()
            .is_err());
        assert!(LoggerConfig::new()
            .with_sampling_rate(-0.1)
            .validate()
            .is_err());
        assert!(LoggerConfig::new()
            .with_sampling_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_file_target_requires_path() {
        let config = LoggerConfig::new().with_target(TargetKind::File);
        assert!(config.validate().is_err());

        let config = LoggerConfig::new().with_file("/tmp/app.log");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_async_requires_buffer() {
        let mut config = LoggerConfig::new().with_async_io(0);
        assert!(config.validate().is_err());
        config.buffer_size = 16;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = LoggerConfig::new().with_batching(0, Duration::from_millis(10));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LoggerConfig::new()
            .with_level(Level::Warn)
            .with_format(Format::Binary)
            .with_file("/var/log/app.bin")
            .with_dedup(Duration::from_secs(5));

        let json = serde_json::to_string(&config).unwrap();
        let back: LoggerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, Level::Warn);
        assert_eq!(back.format, Format::Binary);
        assert_eq!(back.file_path, Some(PathBuf::from("/var/log/app.bin")));
        assert_eq!(back.dedup, config.dedup);
    }
}
