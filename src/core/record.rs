//! Log record structures

use super::context::Context;
use super::encoder::Format;
use super::level::LogLevel;
use super::value::FieldValue;
use chrono::{DateTime, Utc};

/// A log call captured before formatting.
///
/// Owned by the emitting call; the context snapshot is taken at emission so a
/// later mutation of the thread context cannot affect this record.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub pairs: Vec<(String, FieldValue)>,
    pub context: Context,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            pairs: Vec::new(),
            context: super::context::current_context(),
        }
    }

    #[must_use]
    pub fn with_pairs(mut self, pairs: Vec<(String, FieldValue)>) -> Self {
        self.pairs = pairs;
        self
    }

    /// Render into the form handed to the delivery pipeline.
    ///
    /// The timestamp is assigned here, at formatting time; queue position does
    /// not define wall-clock order downstream, this field does.
    pub fn render(&self, format: Format, color: bool) -> RenderedRecord {
        RenderedRecord {
            level: self.level,
            line: format.render(self.level, &self.message, &self.pairs, &self.context, color),
            timestamp: Utc::now(),
        }
    }
}

/// A fully rendered record.
///
/// This is what sinks receive and what the async queue buffers. It is moved
/// into the queue by value; producer and worker never share one instance.
#[derive(Debug, Clone)]
pub struct RenderedRecord {
    pub level: LogLevel,
    pub line: String,
    pub timestamp: DateTime<Utc>,
}
