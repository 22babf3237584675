//! Logger facade
//!
//! Orchestrates the level gate, context capture, encoding, and delivery.
//! Instances are self-contained; [`Logger::global`] exposes the process-wide
//! singleton configured from the environment.

use super::console_sync;
use super::context::{self, Context};
use super::encoder::{parse_format, Format};
use super::error::{Result, VixError};
use super::level::{parse_level, LogLevel};
use super::metrics::LoggerMetrics;
use super::pipeline::{
    self, AsyncPipeline, DeliveryMode, OverflowPolicy, QueueItem, SharedSinks,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT, FLUSH_TIMEOUT,
};
use super::record::LogRecord;
use super::sink::Sink;
use super::value::FieldValue;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

pub struct Logger {
    /// Configured minimum level, readable without a lock so a filtered-out
    /// call does no work at all.
    level: AtomicU8,
    inner: Mutex<LoggerInner>,
    metrics: Arc<LoggerMetrics>,
}

struct LoggerInner {
    format: Format,
    color: bool,
    overflow: OverflowPolicy,
    queue_capacity: usize,
    sinks: SharedSinks,
    delivery: Delivery,
}

enum Delivery {
    Sync,
    Async(AsyncPipeline),
}

/// Snapshot of the delivery decision, taken under the config lock and acted
/// on after releasing it so a producer never blocks other callers while the
/// queue applies backpressure.
enum Route {
    Inline(SharedSinks),
    Queue {
        tx: Sender<QueueItem>,
        evict: Receiver<QueueItem>,
        policy: OverflowPolicy,
    },
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(LogLevel::Info as u8),
            inner: Mutex::new(LoggerInner {
                format: Format::Kv,
                color: false,
                overflow: OverflowPolicy::default(),
                queue_capacity: DEFAULT_QUEUE_CAPACITY,
                sinks: Arc::new(Mutex::new(Vec::new())),
                delivery: Delivery::Sync,
            }),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// The process-wide logger, configured from the environment on first use.
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(Logger::from_env)
    }

    /// Build a logger from `VIX_LOG_LEVEL`, `VIX_LOG_FORMAT`,
    /// `VIX_CONSOLE_SYNC`, and the color environment, with a console sink and
    /// a best-effort `vix.log` file sink.
    ///
    /// A sink that fails to construct is reported on stderr and skipped; the
    /// logger starts with whatever sinks succeeded.
    pub fn from_env() -> Self {
        let logger = Logger::new();

        logger.set_level(match std::env::var("VIX_LOG_LEVEL") {
            Ok(s) => parse_level(&s),
            Err(_) => LogLevel::Info,
        });
        logger.set_format(match std::env::var("VIX_LOG_FORMAT") {
            Ok(s) => parse_format(&s),
            Err(_) => Format::Kv,
        });
        logger.set_color(crate::term::colors_enabled());

        if let Ok(v) = std::env::var("VIX_CONSOLE_SYNC") {
            let v = v.to_ascii_lowercase();
            console_sync::set_console_sync(v != "0" && v != "false");
        }

        logger.add_sink(Box::new(crate::sinks::ConsoleSink::new()));
        match crate::sinks::FileSink::new("vix.log") {
            Ok(sink) => logger.add_sink(Box::new(sink)),
            Err(e) => eprintln!("[vix-log] file sink init failed: {}", e),
        }

        logger
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // --- configuration ---------------------------------------------------

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Re-read `VIX_LOG_LEVEL`; an unset variable leaves the level unchanged.
    pub fn set_level_from_env(&self) {
        if let Ok(s) = std::env::var("VIX_LOG_LEVEL") {
            self.set_level(parse_level(&s));
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_index(self.level.load(Ordering::Relaxed))
    }

    /// Whether a record at `level` would currently be emitted.
    ///
    /// `Off` means "no output", not "maximum severity": it is matched by
    /// identity on both sides before any ordering comparison happens.
    pub fn enabled(&self, level: LogLevel) -> bool {
        let min = self.level();
        min != LogLevel::Off && level != LogLevel::Off && level >= min
    }

    pub fn set_format(&self, format: Format) {
        self.inner.lock().format = format;
    }

    /// Re-read `VIX_LOG_FORMAT`; an unset variable leaves the format unchanged.
    pub fn set_format_from_env(&self) {
        if let Ok(s) = std::env::var("VIX_LOG_FORMAT") {
            self.set_format(parse_format(&s));
        }
    }

    pub fn format(&self) -> Format {
        self.inner.lock().format
    }

    pub fn set_color(&self, color: bool) {
        self.inner.lock().color = color;
    }

    pub fn set_overflow_policy(&self, policy: OverflowPolicy) {
        self.inner.lock().overflow = policy;
    }

    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.inner.lock().sinks.lock().push(sink);
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        match self.inner.lock().delivery {
            Delivery::Sync => DeliveryMode::Sync,
            Delivery::Async(_) => DeliveryMode::Async,
        }
    }

    /// Switch between inline and queued delivery.
    ///
    /// Turning async off does not flush the retiring queue: its worker keeps
    /// draining independently while this call returns immediately. Use
    /// [`Logger::flush`] first when durability is needed before continuing.
    pub fn set_async(&self, enable: bool) {
        let mut inner = self.inner.lock();
        let is_async = matches!(inner.delivery, Delivery::Async(_));

        if enable && !is_async {
            let pipeline = AsyncPipeline::start(
                inner.queue_capacity,
                Arc::clone(&inner.sinks),
                Arc::clone(&self.metrics),
            );
            inner.delivery = Delivery::Async(pipeline);
        } else if !enable && is_async {
            if let Delivery::Async(pipeline) =
                std::mem::replace(&mut inner.delivery, Delivery::Sync)
            {
                pipeline.detach();
            }
        }
    }

    // --- context ----------------------------------------------------------

    /// Replace the calling thread's context wholesale.
    pub fn set_context(&self, ctx: Context) {
        context::set_context(ctx);
    }

    pub fn clear_context(&self) {
        context::clear_context();
    }

    pub fn get_context(&self) -> Context {
        context::current_context()
    }

    // --- emission ---------------------------------------------------------

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }
        self.dispatch(LogRecord::new(level, message.into()));
    }

    /// Log with a `[module]` prefix on the message.
    pub fn log_module(&self, module: &str, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }
        let message = message.into();
        self.dispatch(LogRecord::new(level, format!("[{}] {}", module, message)));
    }

    /// Log with ordered key/value pairs attached after the message.
    pub fn log_structured(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        pairs: &[(&str, FieldValue)],
    ) {
        if !self.enabled(level) {
            return;
        }
        let pairs = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        self.dispatch(LogRecord::new(level, message.into()).with_pairs(pairs));
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Log `message` at Error and hand back an error to propagate.
    ///
    /// For call sites that want abort-this-operation semantics:
    /// `return Err(logger.fail("checksum mismatch"))`.
    #[must_use]
    pub fn fail(&self, message: impl Into<String>) -> VixError {
        let message = message.into();
        self.log(LogLevel::Error, message.clone());
        VixError::failure(message)
    }

    fn dispatch(&self, record: LogRecord) {
        let (format, color, route) = {
            let inner = self.inner.lock();
            let route = match &inner.delivery {
                Delivery::Sync => Route::Inline(Arc::clone(&inner.sinks)),
                Delivery::Async(p) => Route::Queue {
                    tx: p.sender(),
                    evict: p.evictor(),
                    policy: inner.overflow,
                },
            };
            (inner.format, inner.color, route)
        };

        let rendered = record.render(format, color);
        match route {
            Route::Inline(sinks) => pipeline::deliver(&sinks, &rendered, &self.metrics),
            Route::Queue { tx, evict, policy } => {
                pipeline::enqueue(&tx, &evict, policy, rendered, &self.metrics)
            }
        }
    }

    // --- lifecycle --------------------------------------------------------

    /// Wait until everything accepted so far has reached the sinks.
    ///
    /// In async mode this enqueues a drain barrier and blocks until the
    /// worker acks it (bounded by [`FLUSH_TIMEOUT`]).
    pub fn flush(&self) -> Result<()> {
        let route = {
            let inner = self.inner.lock();
            match &inner.delivery {
                Delivery::Sync => Route::Inline(Arc::clone(&inner.sinks)),
                Delivery::Async(p) => Route::Queue {
                    tx: p.sender(),
                    evict: p.evictor(),
                    policy: inner.overflow,
                },
            }
        };

        match route {
            Route::Inline(sinks) => pipeline::flush_sinks(&sinks),
            Route::Queue { tx, .. } => {
                let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
                if tx.send(QueueItem::Flush(ack_tx)).is_err() {
                    return Ok(());
                }
                ack_rx
                    .recv_timeout(FLUSH_TIMEOUT)
                    .map_err(|_| VixError::FlushTimeout(FLUSH_TIMEOUT))
            }
        }
    }

    /// Stop the async worker (if any), draining the queue first.
    ///
    /// Returns false when the drain did not finish within `timeout`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let delivery = {
            let mut inner = self.inner.lock();
            std::mem::replace(&mut inner.delivery, Delivery::Sync)
        };
        let drained = match delivery {
            Delivery::Sync => true,
            Delivery::Async(pipeline) => pipeline.shutdown(timeout),
        };

        let sinks = Arc::clone(&self.inner.lock().sinks);
        if let Err(e) = pipeline::flush_sinks(&sinks) {
            eprintln!("[vix-log] flush during shutdown failed: {}", e);
            return false;
        }
        drained
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped();
        if dropped > 0 {
            eprintln!(
                "[vix-log] shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Fluent construction for non-global logger instances.
///
/// # Example
/// ```
/// use vix_utils::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .format(Format::Json)
///     .async_mode(1024)
///     .overflow_policy(OverflowPolicy::DropOldest)
///     .build();
/// logger.debug("ready");
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    format: Format,
    color: bool,
    sinks: Vec<Box<dyn Sink>>,
    async_capacity: Option<usize>,
    overflow: OverflowPolicy,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            format: Format::Kv,
            color: false,
            sinks: Vec::new(),
            async_capacity: None,
            overflow: OverflowPolicy::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Enable queued delivery with the given queue capacity.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, capacity: usize) -> Self {
        self.async_capacity = Some(capacity);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_level(self.level);
        logger.set_format(self.format);
        logger.set_color(self.color);
        logger.set_overflow_policy(self.overflow);
        for sink in self.sinks {
            logger.add_sink(sink);
        }
        if let Some(capacity) = self.async_capacity {
            logger.inner.lock().queue_capacity = capacity;
            logger.set_async(true);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
