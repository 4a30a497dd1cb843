//! # wirelog
//!
//! A structured logging engine with typed fields, pluggable wire formats,
//! and sync or async dispatch.
//!
//! ## Features
//!
//! - **Leveled records**: `Debug` through `Fatal`, with a minimum-level
//!   filter checked before anything else
//! - **Typed fields**: ordered `key=value` pairs carrying strings,
//!   integers, floats, and booleans
//! - **Wire formats**: human-readable text, newline-delimited JSON, and a
//!   compact length-prefixed binary format with a symmetric decoder
//! - **Targets**: stdout, stderr, and size-rotated files with bounded
//!   backup retention
//! - **Flow control**: probabilistic sampling, sliding-window
//!   deduplication, and size/timeout batching
//! - **Dispatch**: synchronous writes under a mutex, or a bounded queue
//!   feeding a worker thread that drains completely on shutdown
//!
//! ## Quick start
//!
//! ```no_run
//! use wirelog::{Level, Logger, LoggerConfig};
//!
//! let mut logger = Logger::init(
//!     LoggerConfig::new()
//!         .with_level(Level::Debug)
//!         .with_file("/var/log/app.log")
//!         .with_async_io(1024),
//! )?;
//!
//! logger.info("server started")?;
//! logger.shutdown()?;
//! # Ok::<(), wirelog::LoggerError>(())
//! ```
//!
//! Or through the process-wide default logger and the macros:
//!
//! ```no_run
//! wirelog::init(wirelog::LoggerConfig::default())?;
//! wirelog::info!("ready", "port" => 8080_u64)?;
//! wirelog::shutdown()?;
//! # Ok::<(), wirelog::LoggerError>(())
//! ```
//!
//! ## Cargo features
//!
//! | Feature   | Default | Provides                          |
//! |-----------|---------|-----------------------------------|
//! | `console` | yes     | ANSI level colors on console text |
//! | `file`    | yes     | Rotating file target              |
//! | `json`    | yes     | JSON wire format                  |
//! | `binary`  | yes     | Binary wire format and decoder    |
//!
//! Selecting a compiled-out format or target is a [`Logger::init`] error,
//! never a silent downgrade.

pub mod config;
pub mod core;
pub mod encode;
pub mod global;
#[macro_use]
pub mod macros;
pub mod targets;

pub use crate::config::{DedupConfig, Format, LoggerConfig, TargetKind};
pub use crate::core::batch::BatchConfig;
pub use crate::core::error::{LoggerError, Result};
pub use crate::core::field::{Field, FieldValue};
pub use crate::core::level::Level;
pub use crate::core::logger::Logger;
pub use crate::core::metrics::LoggerMetrics;
pub use crate::core::record::Record;
pub use crate::core::sampler::Sampler;
pub use crate::core::timestamp::TimestampFormat;
pub use crate::global::{flush, init, metrics, shutdown};

#[cfg(feature = "binary")]
pub use crate::encode::decode_record;

/// Common imports for applications.
pub mod prelude {
    pub use crate::config::{Format, LoggerConfig, TargetKind};
    pub use crate::core::error::{LoggerError, Result};
    pub use crate::core::field::{Field, FieldValue};
    pub use crate::core::level::Level;
    pub use crate::core::logger::Logger;
}
