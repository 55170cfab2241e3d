//! Outstanding-work counter with a blocking wait for zero.
//!
//! The count lives under a `parking_lot::Mutex` and every decrement that
//! reaches zero notifies a `Condvar` while still holding the lock, so a
//! waiter cannot miss the zero crossing.

use parking_lot::{Condvar, Mutex};

/// Counts jobs that have been submitted but have not fully finished.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: Mutex<usize>,
    zero: Condvar,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more job. Must happen before the job is handed anywhere.
    pub fn increment(&self) {
        *self.outstanding.lock() += 1;
    }

    /// Marks one job as finished, waking waiters when the count hits zero.
    pub fn decrement(&self) {
        let mut outstanding = self.outstanding.lock();
        debug_assert!(*outstanding > 0, "decrement without a matching increment");
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.zero.notify_all();
        }
    }

    /// Blocks until the outstanding count is zero.
    pub fn wait_until_zero(&self) {
        let mut outstanding = self.outstanding.lock();
        while *outstanding != 0 {
            self.zero.wait(&mut outstanding);
        }
    }

    /// Current count. Only a snapshot while other threads are running.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.lock()
    }
}

/// Decrements a [`CompletionTracker`] once when dropped, unwinding included.
#[must_use = "the job is marked finished as soon as the guard is dropped"]
pub struct CompletionGuard<'a> {
    tracker: &'a CompletionTracker,
}

impl<'a> CompletionGuard<'a> {
    /// Takes over one increment already made on `tracker`.
    pub fn new(tracker: &'a CompletionTracker) -> Self {
        Self { tracker }
    }
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.tracker.decrement();
    }
}
