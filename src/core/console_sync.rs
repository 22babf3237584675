//! Console coordination
//!
//! Process-wide gate that keeps log lines from tearing through the one-shot
//! startup banner. The banner printer calls [`reset_banner`] before writing
//! and [`mark_banner_done`] after; while console sync is enabled, every
//! physical log write first waits for the banner and then holds the console
//! lock. The gate starts out open (`done = true`) so logging can never
//! deadlock when no banner is ever printed.

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

static CONSOLE: Mutex<()> = Mutex::new(());
static BANNER_DONE: Mutex<bool> = Mutex::new(true);
static BANNER_CV: Condvar = Condvar::new();
static CONSOLE_SYNC: AtomicBool = AtomicBool::new(false);

/// Opt into banner-aware console serialization.
pub fn set_console_sync(enabled: bool) {
    CONSOLE_SYNC.store(enabled, Ordering::Relaxed);
}

pub fn console_sync_enabled() -> bool {
    CONSOLE_SYNC.load(Ordering::Relaxed)
}

/// Hold the console for one physical write. The guard releases on drop.
pub fn acquire_console() -> MutexGuard<'static, ()> {
    CONSOLE.lock()
}

/// Block until no banner is in flight. Returns immediately in the default
/// state.
pub fn wait_for_banner() {
    let mut done = BANNER_DONE.lock();
    BANNER_CV.wait_while(&mut done, |done| !*done);
}

/// Close the gate. Called exactly once, right before a banner prints.
pub fn reset_banner() {
    *BANNER_DONE.lock() = false;
}

/// Reopen the gate and wake every waiter. Called exactly once, right after
/// the banner finished printing.
pub fn mark_banner_done() {
    {
        let mut done = BANNER_DONE.lock();
        *done = true;
    }
    BANNER_CV.notify_all();
}

/// Serializes tests that cycle the process-wide banner latch.
#[cfg(test)]
pub(crate) static BANNER_TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn gate_is_open_by_default() {
        let _serial = BANNER_TEST_LOCK.lock();
        // Must return without any banner ever being announced.
        wait_for_banner();
    }

    #[test]
    fn waiters_resume_after_banner_completes() {
        let _serial = BANNER_TEST_LOCK.lock();
        let order = Arc::new(AtomicU32::new(0));

        reset_banner();
        let seen = Arc::clone(&order);
        let waiter = std::thread::spawn(move || {
            wait_for_banner();
            seen.load(Ordering::SeqCst)
        });

        std::thread::sleep(Duration::from_millis(50));
        order.store(1, Ordering::SeqCst);
        mark_banner_done();

        let observed = waiter.join().expect("waiter panicked");
        assert_eq!(observed, 1, "waiter ran before the banner finished");
    }
}
