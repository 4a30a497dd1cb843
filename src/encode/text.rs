//! Human-readable text encoder
//!
//! Line shape: `<timestamp> [<LEVEL>] <message>` followed by space-separated
//! `key=value` pairs when fields are present. This format is always
//! available and is the fallback when other formats are compiled out.

use crate::core::error::Result;
use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::core::timestamp::TimestampFormat;
use std::borrow::Cow;
use std::io::Write;

/// Escape line breaks and tabs so one record stays one output line.
/// Matches the message sanitization applied by `Record`.
fn escape(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            text.replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t"),
        )
    } else {
        Cow::Borrowed(text)
    }
}

#[derive(Debug, Default)]
pub struct TextEncoder {
    timestamp_format: TimestampFormat,
    /// ANSI-color the level token (console targets only)
    use_colors: bool,
}

impl TextEncoder {
    pub fn new(timestamp_format: TimestampFormat) -> Self {
        Self {
            timestamp_format,
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> Result<()> {
        let timestamp = self.timestamp_format.format(&record.timestamp);
        let level = self.level_token(record);

        write!(buf, "{} [{}] {}", timestamp, level, record.message)?;

        for field in &record.fields {
            buf.push(b' ');
            buf.extend_from_slice(escape(&field.key).as_bytes());
            buf.push(b'=');
            match &field.value {
                FieldValue::Str(s) => {
                    let s = escape(s);
                    // Quote only when the value contains whitespace
                    if s.chars().any(char::is_whitespace) {
                        write!(buf, "\"{}\"", s)?;
                    } else {
                        buf.extend_from_slice(s.as_bytes());
                    }
                }
                FieldValue::Int(i) => write!(buf, "{}", i)?,
                FieldValue::Uint(u) => write!(buf, "{}", u)?,
                FieldValue::Float(f) => write!(buf, "{}", f)?,
                FieldValue::Bool(b) => write!(buf, "{}", b)?,
            }
        }

        buf.push(b'\n');
        Ok(())
    }

    #[cfg(feature = "console")]
    fn level_token(&self, record: &Record) -> String {
        use colored::Colorize;
        if self.use_colors {
            record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string()
        } else {
            record.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_token(&self, record: &Record) -> String {
        record.level.to_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::Field;
    use crate::core::level::Level;

    fn encode_to_string(encoder: &TextEncoder, record: &Record) -> String {
        let mut buf = Vec::new();
        encoder.encode(record, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_basic_line_shape() {
        let encoder = TextEncoder::default();
        let record = Record::new(Level::Info, "Server listening on port 8080");
        let line = encode_to_string(&encoder, &record);

        assert!(line.ends_with("[INFO] Server listening on port 8080\n"));
        // Timestamp comes first, separated by a space
        let ts = line.split(' ').next().unwrap();
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_fields_rendered_in_order() {
        let encoder = TextEncoder::default();
        let record = Record::new(Level::Warn, "slow query").with_fields(&[
            Field::new("duration_ms", 1250_u64),
            Field::new("table", "users"),
            Field::new("cached", false),
        ]);
        let line = encode_to_string(&encoder, &record);

        assert!(line.contains("slow query duration_ms=1250 table=users cached=false\n"));
    }

    #[test]
    fn test_string_with_whitespace_quoted() {
        let encoder = TextEncoder::default();
        let record = Record::new(Level::Info, "request")
            .with_fields(&[Field::new("agent", "curl 8.0"), Field::new("path", "/api")]);
        let line = encode_to_string(&encoder, &record);

        assert!(line.contains("agent=\"curl 8.0\""));
        assert!(line.contains("path=/api"));
    }

    #[test]
    fn test_unix_timestamp_format() {
        let encoder = TextEncoder::new(TimestampFormat::Unix);
        let record = Record::new(Level::Debug, "tick");
        let line = encode_to_string(&encoder, &record);

        let ts = line.split(' ').next().unwrap();
        assert!(ts.parse::<i64>().is_ok());
    }

    #[test]
    fn test_field_newlines_cannot_forge_lines() {
        let encoder = TextEncoder::default();
        let record = Record::new(Level::Info, "one record").with_fields(&[
            Field::new("note", "line one\nFAKE [ERROR] forged line"),
            Field::new("bad\tkey", "a\rb"),
        ]);
        let line = encode_to_string(&encoder, &record);

        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
        assert!(line.contains("note=\"line one\\nFAKE [ERROR] forged line\""));
        assert!(line.contains("bad\\tkey=a\\rb"));
    }

    #[test]
    fn test_numeric_field_rendering() {
        let encoder = TextEncoder::default();
        let record = Record::new(Level::Info, "metrics").with_fields(&[
            Field::new("neg", -42_i64),
            Field::new("ratio", 0.25),
        ]);
        let line = encode_to_string(&encoder, &record);

        assert!(line.contains("neg=-42"));
        assert!(line.contains("ratio=0.25"));
    }
}
