//! Binary wire format encoder and decoder
//!
//! Fixed, versionless layout optimized for size and parse speed:
//!
//! ```text
//! [timestamp: u64 LE][level: u8][message_len: u16 LE][message bytes]
//! [field_count: u8][field ...]
//!
//! field = [key_len: u8][key bytes][value_type: u8][value bytes]
//! ```
//!
//! Value encodings by type tag:
//! - 0 string:  `[len: u16 LE][bytes]`
//! - 1 int:     zigzag varint
//! - 2 uint:    varint
//! - 3 float:   8-byte IEEE-754 LE
//! - 4 bool:    1 byte (0/1)
//!
//! Varints carry 7 bits per byte, least-significant group first, with the
//! high bit as the continuation flag. The 1-byte/2-byte length fields are
//! hard limits: an oversized message, key, value or field count rejects
//! the whole record with an encoding error, nothing is written. Decoding
//! is symmetric and rejects truncated buffers with a distinct error
//! instead of reading out of bounds.

use crate::core::error::{LoggerError, Result};
use crate::core::field::{Field, FieldValue};
use crate::core::level::Level;
use crate::core::record::Record;

pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize;
pub const MAX_KEY_LEN: usize = u8::MAX as usize;
pub const MAX_STRING_VALUE_LEN: usize = u16::MAX as usize;
pub const MAX_FIELD_COUNT: usize = u8::MAX as usize;

const TAG_STRING: u8 = 0;
const TAG_INT: u8 = 1;
const TAG_UINT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_BOOL: u8 = 4;

#[derive(Debug, Default)]
pub struct BinaryEncoder;

impl BinaryEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> Result<()> {
        let message = record.message.as_bytes();
        if message.len() > MAX_MESSAGE_LEN {
            return Err(LoggerError::EncodingLimit {
                what: "message",
                len: message.len(),
                max: MAX_MESSAGE_LEN,
            });
        }
        if record.fields.len() > MAX_FIELD_COUNT {
            return Err(LoggerError::EncodingLimit {
                what: "field count",
                len: record.fields.len(),
                max: MAX_FIELD_COUNT,
            });
        }

        buf.extend_from_slice(&record.timestamp_secs().to_le_bytes());
        buf.push(record.level as u8);
        buf.extend_from_slice(&(message.len() as u16).to_le_bytes());
        buf.extend_from_slice(message);
        buf.push(record.fields.len() as u8);

        for field in &record.fields {
            encode_field(field, buf)?;
        }
        Ok(())
    }
}

fn encode_field(field: &Field, buf: &mut Vec<u8>) -> Result<()> {
    let key = field.key.as_bytes();
    if key.len() > MAX_KEY_LEN {
        return Err(LoggerError::EncodingLimit {
            what: "field key",
            len: key.len(),
            max: MAX_KEY_LEN,
        });
    }
    buf.push(key.len() as u8);
    buf.extend_from_slice(key);

    match &field.value {
        FieldValue::Str(s) => {
            let bytes = s.as_bytes();
            if bytes.len() > MAX_STRING_VALUE_LEN {
                return Err(LoggerError::EncodingLimit {
                    what: "string value",
                    len: bytes.len(),
                    max: MAX_STRING_VALUE_LEN,
                });
            }
            buf.push(TAG_STRING);
            buf.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
            buf.extend_from_slice(bytes);
        }
        FieldValue::Int(i) => {
            buf.push(TAG_INT);
            write_varint(buf, zigzag_encode(*i));
        }
        FieldValue::Uint(u) => {
            buf.push(TAG_UINT);
            write_varint(buf, *u);
        }
        FieldValue::Float(f) => {
            buf.push(TAG_FLOAT);
            buf.extend_from_slice(&f.to_le_bytes());
        }
        FieldValue::Bool(b) => {
            buf.push(TAG_BOOL);
            buf.push(u8::from(*b));
        }
    }
    Ok(())
}

/// Decode one record from the front of `buf`.
///
/// Returns the record and the number of bytes consumed, so callers can
/// iterate over a stream of concatenated records.
pub fn decode_record(buf: &[u8]) -> Result<(Record, usize)> {
    let mut cursor = Cursor::new(buf);

    let timestamp = u64::from_le_bytes(cursor.take_array::<8>()?);
    let level_byte = cursor.take_byte()?;
    let level = Level::from_wire(level_byte).ok_or(LoggerError::InvalidTag {
        what: "level",
        tag: level_byte,
        offset: cursor.offset - 1,
    })?;

    let message_len = u16::from_le_bytes(cursor.take_array::<2>()?) as usize;
    let message = cursor.take_str(message_len)?.to_string();

    let field_count = cursor.take_byte()? as usize;
    let mut fields = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        fields.push(decode_field(&mut cursor)?);
    }

    let record = Record::from_wire_parts(timestamp, level, message, fields);
    Ok((record, cursor.offset))
}

fn decode_field(cursor: &mut Cursor<'_>) -> Result<Field> {
    let key_len = cursor.take_byte()? as usize;
    let key = cursor.take_str(key_len)?.to_string();

    let tag = cursor.take_byte()?;
    let value = match tag {
        TAG_STRING => {
            let len = u16::from_le_bytes(cursor.take_array::<2>()?) as usize;
            FieldValue::Str(cursor.take_str(len)?.to_string())
        }
        TAG_INT => FieldValue::Int(zigzag_decode(cursor.take_varint()?)),
        TAG_UINT => FieldValue::Uint(cursor.take_varint()?),
        TAG_FLOAT => FieldValue::Float(f64::from_le_bytes(cursor.take_array::<8>()?)),
        TAG_BOOL => FieldValue::Bool(cursor.take_byte()? != 0),
        other => {
            return Err(LoggerError::InvalidTag {
                what: "value type",
                tag: other,
                offset: cursor.offset - 1,
            })
        }
    };
    Ok(Field { key, value })
}

/// Bounds-checked reader over a byte slice.
struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.offset;
        if remaining < len {
            return Err(LoggerError::Truncated {
                offset: self.offset,
                needed: len - remaining,
            });
        }
        let slice = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn take_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    fn take_str(&mut self, len: usize) -> Result<&'a str> {
        let start = self.offset;
        let slice = self.take(len)?;
        std::str::from_utf8(slice).map_err(|_| LoggerError::InvalidTag {
            what: "utf-8 string",
            tag: 0,
            offset: start,
        })
    }

    fn take_varint(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.take_byte()?;
            // 10 groups of 7 bits cover u64; anything longer is malformed
            if shift >= 64 {
                return Err(LoggerError::InvalidTag {
                    what: "varint",
                    tag: byte,
                    offset: self.offset - 1,
                });
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }
}

/// 7-bits-per-byte varint, least-significant group first.
fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Zigzag maps small-magnitude signed values to small unsigned values so
/// the varint stays short for negatives.
fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
