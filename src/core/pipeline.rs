//! Delivery pipeline
//!
//! Two delivery modes over the same sinks:
//! - `Sync`: the calling thread writes inline.
//! - `Async`: a bounded queue feeds one worker thread; producers enqueue and
//!   return unless the queue is full, where the overflow policy decides
//!   between backpressure and evicting the oldest buffered record.
//!
//! Switching modes never discards accepted records: a retired async queue
//! keeps draining on its own thread while the logger already runs in the new
//! mode.

use super::console_sync;
use super::error::Result;
use super::metrics::LoggerMetrics;
use super::record::RenderedRecord;
use super::sink::Sink;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Queue capacity used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// How long [`crate::Logger::flush`] waits for the worker to reach the flush
/// marker before giving up.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a dropped logger waits for its worker to finish draining.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Behavior when the async queue is full.
///
/// `Block` applies backpressure to the producer and loses nothing;
/// `DropOldest` bounds producer latency by evicting the oldest buffered
/// record. The two are materially different under load, so the choice is a
/// runtime option rather than a fixed default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    #[default]
    Block,
    DropOldest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Sync,
    Async,
}

pub(crate) enum QueueItem {
    Record(RenderedRecord),
    /// Drain barrier: the worker acks once everything queued ahead of it has
    /// been written.
    Flush(Sender<()>),
}

pub(crate) type SharedSinks = Arc<Mutex<Vec<Box<dyn Sink>>>>;

pub(crate) struct AsyncPipeline {
    tx: Sender<QueueItem>,
    /// Second handle on the queue; lets producers evict the oldest entry
    /// under `DropOldest` (the channel is MPMC).
    evict: Receiver<QueueItem>,
    worker: Option<thread::JoinHandle<()>>,
}

impl AsyncPipeline {
    pub fn start(capacity: usize, sinks: SharedSinks, metrics: Arc<LoggerMetrics>) -> Self {
        let (tx, rx) = bounded(capacity);
        let evict = rx.clone();

        let worker = thread::spawn(move || {
            // Exits once every sender is gone and the queue is drained.
            while let Ok(item) = rx.recv() {
                match item {
                    QueueItem::Record(record) => deliver(&sinks, &record, &metrics),
                    QueueItem::Flush(ack) => {
                        let _ = flush_sinks(&sinks);
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self {
            tx,
            evict,
            worker: Some(worker),
        }
    }

    pub fn sender(&self) -> Sender<QueueItem> {
        self.tx.clone()
    }

    pub fn evictor(&self) -> Receiver<QueueItem> {
        self.evict.clone()
    }

    /// Let go of the queue without waiting: the worker keeps draining what
    /// was accepted and exits on its own.
    pub fn detach(mut self) {
        self.worker.take();
    }

    /// Drop the producer side and wait for the worker to finish draining.
    /// Returns false if the worker did not finish within the timeout.
    pub fn shutdown(mut self, timeout: Duration) -> bool {
        let Some(handle) = self.worker.take() else {
            return true;
        };
        drop(self.tx);
        drop(self.evict);

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[vix-log] worker thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }
            if start.elapsed() >= timeout {
                eprintln!(
                    "[vix-log] worker thread did not finish within {:?}; some records may be lost",
                    timeout
                );
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

/// Enqueue one record, honoring the overflow policy.
pub(crate) fn enqueue(
    tx: &Sender<QueueItem>,
    evict: &Receiver<QueueItem>,
    policy: OverflowPolicy,
    record: RenderedRecord,
    metrics: &LoggerMetrics,
) {
    match policy {
        OverflowPolicy::Block => match tx.try_send(QueueItem::Record(record)) {
            Ok(()) => {}
            Err(TrySendError::Full(item)) => {
                metrics.record_queue_full();
                metrics.record_block();
                // Backpressure: wait for the worker to free a slot.
                let _ = tx.send(item);
            }
            Err(TrySendError::Disconnected(_)) => {}
        },
        OverflowPolicy::DropOldest => {
            let mut item = QueueItem::Record(record);
            loop {
                match tx.try_send(item) {
                    Ok(()) => break,
                    Err(TrySendError::Full(rejected)) => {
                        metrics.record_queue_full();
                        match evict.try_recv() {
                            Ok(QueueItem::Record(_)) => {
                                metrics.record_dropped();
                            }
                            // Flush markers are acked, never dropped.
                            Ok(QueueItem::Flush(ack)) => {
                                let _ = ack.send(());
                            }
                            // The worker freed a slot first; just retry.
                            Err(_) => {}
                        }
                        item = rejected;
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
        }
    }
}

/// Write one rendered record to every sink.
///
/// Under console sync this is the point that waits out a banner in flight and
/// serializes the physical write. Sink errors and panics are contained per
/// record so one bad sink cannot starve the rest of the stream.
pub(crate) fn deliver(sinks: &SharedSinks, record: &RenderedRecord, metrics: &LoggerMetrics) {
    let _console = if console_sync::console_sync_enabled() {
        console_sync::wait_for_banner();
        Some(console_sync::acquire_console())
    } else {
        None
    };

    let mut sinks = sinks.lock();
    let mut failed = false;
    for sink in sinks.iter_mut() {
        match catch_unwind(AssertUnwindSafe(|| sink.write(record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[vix-log] sink '{}' failed: {}", sink.name(), e);
                failed = true;
            }
            Err(_) => {
                eprintln!(
                    "[vix-log] sink '{}' panicked; remaining sinks continue",
                    sink.name()
                );
                failed = true;
            }
        }
    }

    if failed {
        metrics.record_dropped();
    } else {
        metrics.record_written();
    }
}

pub(crate) fn flush_sinks(sinks: &SharedSinks) -> Result<()> {
    let mut sinks = sinks.lock();
    for sink in sinks.iter_mut() {
        match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
            Ok(result) => result?,
            Err(_) => {
                eprintln!("[vix-log] sink '{}' panicked during flush", sink.name());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::LogLevel;
    use chrono::Utc;

    fn rendered(line: &str) -> RenderedRecord {
        RenderedRecord {
            level: LogLevel::Info,
            line: line.to_string(),
            timestamp: Utc::now(),
        }
    }

    struct CollectSink(Arc<Mutex<Vec<String>>>);

    impl Sink for CollectSink {
        fn write(&mut self, record: &RenderedRecord) -> Result<()> {
            self.0.lock().push(record.line.clone());
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "collect"
        }
    }

    struct PanicSink;

    impl Sink for PanicSink {
        fn write(&mut self, _record: &RenderedRecord) -> Result<()> {
            panic!("boom");
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "panic"
        }
    }

    #[test]
    fn a_panicking_sink_does_not_starve_the_next_one() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sinks: SharedSinks = Arc::new(Mutex::new(vec![
            Box::new(PanicSink),
            Box::new(CollectSink(Arc::clone(&lines))),
        ]));
        let metrics = LoggerMetrics::new();

        deliver(&sinks, &rendered("still here"), &metrics);

        assert_eq!(*lines.lock(), ["still here"]);
        assert_eq!(metrics.dropped(), 1);
    }

    #[test]
    fn drop_oldest_keeps_the_newest_records() {
        let (tx, rx) = bounded(2);
        let metrics = LoggerMetrics::new();

        for i in 0..5 {
            enqueue(
                &tx,
                &rx,
                OverflowPolicy::DropOldest,
                rendered(&format!("m{}", i)),
                &metrics,
            );
        }

        let mut remaining = Vec::new();
        while let Ok(QueueItem::Record(r)) = rx.try_recv() {
            remaining.push(r.line);
        }
        assert_eq!(remaining, vec!["m3".to_string(), "m4".to_string()]);
        assert_eq!(metrics.dropped(), 3);
        assert!(metrics.queue_full_events() >= 3);
    }

    #[test]
    fn detached_pipeline_drains_in_the_background() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sinks: SharedSinks = Arc::new(Mutex::new(vec![Box::new(CollectSink(Arc::clone(
            &lines,
        ))) as Box<dyn Sink>]));
        let metrics = Arc::new(LoggerMetrics::new());

        let pipeline = AsyncPipeline::start(16, Arc::clone(&sinks), Arc::clone(&metrics));
        let tx = pipeline.sender();
        for i in 0..8 {
            tx.send(QueueItem::Record(rendered(&format!("m{}", i))))
                .expect("queue closed");
        }
        pipeline.detach();
        drop(tx);

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while lines.lock().len() < 8 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(lines.lock().len(), 8);
    }

    #[test]
    fn shutdown_waits_for_the_drain() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sinks: SharedSinks = Arc::new(Mutex::new(vec![Box::new(CollectSink(Arc::clone(
            &lines,
        ))) as Box<dyn Sink>]));
        let metrics = Arc::new(LoggerMetrics::new());

        let pipeline = AsyncPipeline::start(16, Arc::clone(&sinks), Arc::clone(&metrics));
        let tx = pipeline.sender();
        for i in 0..4 {
            tx.send(QueueItem::Record(rendered(&format!("m{}", i))))
                .expect("queue closed");
        }
        drop(tx);

        assert!(pipeline.shutdown(Duration::from_secs(2)));
        assert_eq!(lines.lock().len(), 4);
    }
}
