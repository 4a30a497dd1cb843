//! Wire format encoders
//!
//! Each encoder turns a [`Record`](crate::core::record::Record) into bytes
//! appended to a caller-provided buffer. Encoders are pure functions of
//! the record plus their static configuration; the pipeline reuses one
//! buffer across calls so the hot path does not allocate.

pub mod text;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "binary")]
pub mod binary;

pub use text::TextEncoder;

#[cfg(feature = "json")]
pub use json::JsonEncoder;

#[cfg(feature = "binary")]
pub use binary::{decode_record, BinaryEncoder};

use crate::core::error::Result;
use crate::core::record::Record;

/// The configured wire format, resolved at `Logger::init`.
#[derive(Debug)]
pub enum Encoder {
    Text(TextEncoder),
    #[cfg(feature = "json")]
    Json(JsonEncoder),
    #[cfg(feature = "binary")]
    Binary(BinaryEncoder),
}

impl Encoder {
    /// Encode one record, appending to `buf`.
    ///
    /// On error nothing is left in `buf` beyond its length at entry; a
    /// rejected record never produces partial output.
    pub fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> Result<()> {
        let mark = buf.len();
        let result = match self {
            Encoder::Text(e) => e.encode(record, buf),
            #[cfg(feature = "json")]
            Encoder::Json(e) => e.encode(record, buf),
            #[cfg(feature = "binary")]
            Encoder::Binary(e) => e.encode(record, buf),
        };
        if result.is_err() {
            buf.truncate(mark);
        }
        result
    }
}
