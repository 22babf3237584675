//! # vix-utils
//!
//! Utility foundation built around a thread-safe, structured logging core.
//!
//! ## Features
//!
//! - **Structured logging**: key/value pairs plus per-thread request context
//!   attached to every record
//! - **Three encodings**: key-value text, compact JSON, colorized pretty JSON
//! - **Runtime-switchable delivery**: inline writes or a bounded queue with a
//!   worker thread and an explicit overflow policy
//! - **Console coordination**: log writes can be gated behind the one-shot
//!   startup banner so the block never tears
//! - **Small utilities**: typed env lookups, UUIDs, scope guards, declarative
//!   field validation, terminal capability detection

pub mod banner;
pub mod clock;
pub mod core;
pub mod env;
pub mod guard;
pub mod macros;
pub mod sinks;
pub mod term;
pub mod uuid;
pub mod validation;

pub mod prelude {
    pub use crate::core::{
        clear_context, current_context, parse_format, parse_level, set_context, Context,
        DeliveryMode, FieldValue, Format, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerMetrics, OverflowPolicy, RenderedRecord, Result, Sink, VixError,
        DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    clear_context, current_context, parse_format, parse_level, set_context, Context, DeliveryMode,
    FieldValue, Format, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerMetrics, OverflowPolicy,
    RenderedRecord, Result, Sink, VixError, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::{ConsoleSink, FileSink};
