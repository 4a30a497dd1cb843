//! Timestamp formatting for the text encoder
//!
//! The JSON and binary formats carry numeric epoch timestamps; only the
//! text format renders timestamps, configurable through this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp rendering for text output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z` (default)
    #[default]
    Iso8601,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        assert_eq!(millis, secs * 1000 + 123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
    }
}
