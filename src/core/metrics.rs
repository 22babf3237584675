//! Delivery counters
//!
//! Cheap atomic counters for logger health: records written, records lost,
//! queue-full incidents, and producer blocking under backpressure.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records handed to every sink without failure
    written: AtomicU64,

    /// Records lost to queue eviction or sink failure
    dropped: AtomicU64,

    /// Times the async queue was found full
    queue_full_events: AtomicU64,

    /// Times a producer blocked waiting for queue space
    block_events: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of records lost, as a percentage. Zero when nothing was logged.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped() as f64;
        let total = self.written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters. Intended for tests.
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.queue_full_events(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn drop_rate_is_a_percentage() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_written();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }
        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "drop rate was {}", rate);
    }

    #[test]
    fn reset_clears_everything() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_dropped();
        metrics.record_queue_full();
        metrics.record_block();

        metrics.reset();

        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.queue_full_events(), 0);
        assert_eq!(metrics.block_events(), 0);
    }
}
