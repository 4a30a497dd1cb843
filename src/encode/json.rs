//! Newline-delimited JSON encoder
//!
//! One object per record:
//! `{"timestamp":<unix secs>,"level":"<NAME>","message":"<escaped>",<fields>}`.
//! Fields become top-level object members in input order. The object is
//! written member by member rather than through a map so duplicate keys
//! and ordering survive; string escaping is delegated to `serde_json`.

use crate::core::error::Result;
use crate::core::field::FieldValue;
use crate::core::record::Record;
use std::io::Write;

#[derive(Debug, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> Result<()> {
        buf.push(b'{');
        write!(buf, "\"timestamp\":{}", record.timestamp_secs())?;
        write!(buf, ",\"level\":\"{}\"", record.level.to_str())?;
        buf.extend_from_slice(b",\"message\":");
        write_json_string(buf, &record.message)?;

        for field in &record.fields {
            buf.push(b',');
            write_json_string(buf, &field.key)?;
            buf.push(b':');
            match &field.value {
                FieldValue::Str(s) => write_json_string(buf, s)?,
                FieldValue::Int(i) => write!(buf, "{}", i)?,
                FieldValue::Uint(u) => write!(buf, "{}", u)?,
                FieldValue::Float(f) => {
                    // JSON has no NaN/Inf; mirror serde_json's Number rules
                    if f.is_finite() {
                        match serde_json::Number::from_f64(*f) {
                            Some(n) => write!(buf, "{}", n)?,
                            None => buf.extend_from_slice(b"null"),
                        }
                    } else {
                        buf.extend_from_slice(b"null");
                    }
                }
                FieldValue::Bool(b) => write!(buf, "{}", b)?,
            }
        }

        buf.extend_from_slice(b"}\n");
        Ok(())
    }
}

/// Write a JSON-escaped, quoted string into the buffer.
fn write_json_string(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    serde_json::to_writer(&mut *buf, s)
        .map_err(|e| crate::core::error::LoggerError::other(format!("JSON escaping failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::Field;
    use crate::core::level::Level;

    fn encode_to_string(record: &Record) -> String {
        let mut buf = Vec::new();
        JsonEncoder::new().encode(record, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_object_shape() {
        let record = Record::new(Level::Info, "User logged in")
            .with_fields(&[Field::new("user_id", 12345_u64), Field::new("success", true)]);
        let line = encode_to_string(&record);

        assert!(line.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed["user_id"], 12345);
        assert_eq!(parsed["success"], true);
        assert!(parsed["timestamp"].is_i64() || parsed["timestamp"].is_u64());
    }

    #[test]
    fn test_member_order_preserved() {
        let record = Record::new(Level::Info, "m")
            .with_fields(&[Field::new("zeta", 1_i64), Field::new("alpha", 2_i64)]);
        let line = encode_to_string(&record);

        let zeta = line.find("\"zeta\"").unwrap();
        let alpha = line.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "field order must match input order");
        assert!(line.starts_with("{\"timestamp\":"));
    }

    #[test]
    fn test_string_escaping() {
        let record = Record::new(Level::Error, "broken \"quote\" and backslash \\")
            .with_fields(&[Field::new("path", "C:\\logs\\app")]);
        let line = encode_to_string(&record);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "broken \"quote\" and backslash \\");
        assert_eq!(parsed["path"], "C:\\logs\\app");
    }

    #[test]
    fn test_control_characters_escaped() {
        // Record sanitization rewrites \n, but fields may still carry
        // control characters that must become \u escapes
        let record =
            Record::new(Level::Info, "ok").with_fields(&[Field::new("raw", "a\u{1}b")]);
        let line = encode_to_string(&record);

        assert!(line.contains("\\u0001"));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["raw"], "a\u{1}b");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        let record =
            Record::new(Level::Warn, "math").with_fields(&[Field::new("rate", f64::NAN)]);
        let line = encode_to_string(&record);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(parsed["rate"].is_null());
    }

    #[test]
    fn test_negative_and_large_numbers() {
        let record = Record::new(Level::Info, "bounds").with_fields(&[
            Field::new("min", i64::MIN),
            Field::new("max", u64::MAX),
        ]);
        let line = encode_to_string(&record);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["min"], i64::MIN);
        assert_eq!(parsed["max"], u64::MAX);
    }
}
