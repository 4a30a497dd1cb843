//! Log record structure

use super::field::Field;
use super::level::Level;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One structured log event prior to encoding.
///
/// A record is ephemeral: it is created at the logging call site and owned
/// by the calling thread (sync path) or the queue slot (async path) until
/// it has been encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
}

impl Record {
    /// Sanitize a log message to prevent log injection attacks.
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a message cannot forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            timestamp: Utc::now(),
            level,
            message: Self::sanitize_message(&message),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: &[Field]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    /// Rebuild a record from decoded wire data. Timestamps on the wire
    /// carry whole seconds only.
    pub fn from_wire_parts(
        timestamp_secs: u64,
        level: Level,
        message: String,
        fields: Vec<Field>,
    ) -> Self {
        let timestamp = Utc
            .timestamp_opt(timestamp_secs as i64, 0)
            .single()
            .unwrap_or_default();
        Self {
            timestamp,
            level,
            message,
            fields,
        }
    }

    /// Whole seconds since the Unix epoch, as carried by the binary format.
    pub fn timestamp_secs(&self) -> u64 {
        self.timestamp.timestamp().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[test]
    fn test_message_sanitization() {
        let record = Record::new(Level::Info, "line one\nFAKE [ERROR] injected\r\tend");
        assert_eq!(record.message, "line one\\nFAKE [ERROR] injected\\r\\tend");
        assert!(!record.message.contains('\n'));
    }

    #[test]
    fn test_fields_preserve_order() {
        let fields = vec![
            Field::new("z", 1_i64),
            Field::new("a", 2_i64),
            Field::new("z", 3_i64),
        ];
        let record = Record::new(Level::Debug, "ordered").with_fields(&fields);
        assert_eq!(record.fields.len(), 3);
        assert_eq!(record.fields[0].key, "z");
        assert_eq!(record.fields[1].key, "a");
        assert_eq!(record.fields[2].value, FieldValue::Int(3));
    }

    #[test]
    fn test_from_wire_parts() {
        let record = Record::from_wire_parts(1_736_332_245, Level::Warn, "resumed".into(), vec![]);
        assert_eq!(record.timestamp_secs(), 1_736_332_245);
        assert_eq!(record.level, Level::Warn);
        assert!(record.fields.is_empty());
    }
}
