//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Requested format or target not compiled into this build
    #[error("{kind} '{name}' is not available in this build")]
    Unavailable { kind: String, name: String },

    /// File target error with path
    #[error("File target error for '{path}': {message}")]
    FileTargetError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Record exceeds a hard limit of the binary wire format
    #[error("Binary encoding limit exceeded: {what} is {len} bytes (max {max})")]
    EncodingLimit {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Binary decoder ran out of input
    #[error("Binary record truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// Binary decoder hit an unknown level or value-type tag
    #[error("Invalid {what} tag {tag} at offset {offset}")]
    InvalidTag {
        what: &'static str,
        tag: u8,
        offset: usize,
    },

    /// Logger already shut down
    #[error("Logger already shut down")]
    LoggerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unavailable-capability error
    pub fn unavailable(kind: impl Into<String>, name: impl Into<String>) -> Self {
        LoggerError::Unavailable {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a file target error
    pub fn file_target(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileTargetError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerConfig", "sampling_rate out of range");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_target("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileTargetError { .. }));

        let err = LoggerError::unavailable("format", "binary");
        assert!(matches!(err, LoggerError::Unavailable { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::EncodingLimit {
            what: "message",
            len: 70_000,
            max: 65_535,
        };
        assert_eq!(
            err.to_string(),
            "Binary encoding limit exceeded: message is 70000 bytes (max 65535)"
        );

        let err = LoggerError::Truncated {
            offset: 9,
            needed: 2,
        };
        assert!(err.to_string().contains("offset 9"));
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
    }
}
