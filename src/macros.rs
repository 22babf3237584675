//! Logging macros over the global logger
//!
//! Formatting only happens when the level gate passes, so a suppressed call
//! costs one atomic load.
//!
//! # Examples
//!
//! ```
//! use vix_utils::{info, warn, LogLevel, Logger};
//!
//! Logger::global().set_level(LogLevel::Info);
//! info!("server listening on port {}", 8080);
//! warn!("retry {} of {}", 1, 3);
//! ```

/// Log a message at an explicit level with `format!` arguments.
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {{
        let logger = $crate::Logger::global();
        if logger.enabled($level) {
            logger.log($level, format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Critical, $($arg)+)
    };
}
