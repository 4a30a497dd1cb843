//! Output targets
//!
//! A target consumes encoded bytes. Targets are owned by the pipeline and
//! accessed only under its write lock (sync path) or by the single worker
//! thread (async path), so implementations need no internal locking.

pub mod console;

#[cfg(feature = "file")]
pub mod file;

pub use console::{ConsoleStream, ConsoleTarget};

#[cfg(feature = "file")]
pub use file::FileTarget;

use crate::core::error::Result;

pub trait Target: Send {
    /// Write one encoded record. `bytes` is the complete wire
    /// representation including any record terminator.
    fn write_record(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush buffered bytes through to the sink.
    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}
