//! Core logger types and traits

pub mod console_sync;
pub mod context;
pub mod encoder;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod pretty;
pub mod record;
pub mod sink;
pub mod value;

pub use context::{clear_context, current_context, set_context, Context};
pub use encoder::{parse_format, Format};
pub use error::{Result, VixError};
pub use level::{parse_level, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pipeline::{
    DeliveryMode, OverflowPolicy, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT, FLUSH_TIMEOUT,
};
pub use record::{LogRecord, RenderedRecord};
pub use sink::Sink;
pub use value::FieldValue;
