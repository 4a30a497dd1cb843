//! Core logging engine
//!
//! The record model, filters, batching, and the logger facade. Encoding
//! and output live in the sibling `encode` and `targets` modules.

pub mod batch;
pub mod dedup;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod sampler;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use level::Level;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use sampler::Sampler;
pub use timestamp::TimestampFormat;
