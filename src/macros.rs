//! Logging macros
//!
//! Thin wrappers over the process-wide default logger. Fields are given
//! as `"key" => value` pairs; values are anything convertible into a
//! [`FieldValue`](crate::FieldValue). Without field pairs the trailing
//! arguments are `format!` arguments. The macros return the logger's
//! `Result`, so call sites decide whether a write failure matters.
//!
//! ```no_run
//! wirelog::info!("server started")?;
//! wirelog::info!("listening on port {}", 8080)?;
//! wirelog::warn!("slow query", "duration_ms" => 1250_u64, "table" => "users")?;
//! # Ok::<(), wirelog::LoggerError>(())
//! ```

/// Emit a record at an explicit level through the default logger.
#[macro_export]
macro_rules! log {
    ($level:expr, $msg:expr) => {
        $crate::global::log($level, $msg)
    };
    ($level:expr, $msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::global::log_with_fields(
            $level,
            $msg,
            &[$($crate::Field::new($key, $value)),+],
        )
    };
    ($level:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $crate::global::log($level, format!($fmt, $($arg),+))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Fatal, $($arg)+) };
}
