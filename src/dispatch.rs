//! Job dispatch: hand a job to an idle worker, or run it right here.
//!
//! The handoff channel is a zero-capacity `crossbeam_channel`, so
//! `try_send` only succeeds when a worker is already parked in `recv`.
//! When nobody is waiting the submitting thread absorbs the job and runs it
//! inline. Once every worker is busy the traversal degrades into plain
//! depth-first recursion on the submitter, which keeps memory bounded and
//! means no submitter ever blocks waiting for queue space.
//!
//! Ordering contract with [`CompletionTracker`]:
//! - the counter is incremented before the job is offered to anyone;
//! - it is decremented only after the job, including every child it
//!   submits, has done all of its own work.

use crate::node::Node;
use crate::thread_pool;
use crate::tracker::{CompletionGuard, CompletionTracker};
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// A job is a classified node whose processing is still pending.
pub type Job = Arc<Node>;

/// Counters describing how jobs were dispatched.
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Jobs accepted by an idle worker
    pub handed_off: AtomicU64,
    /// Jobs run inline by the submitting thread
    pub absorbed: AtomicU64,
    /// Child entries dropped after a classification or listing failure
    pub omitted: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSnapshot {
    pub handed_off: u64,
    pub absorbed: u64,
    pub omitted: u64,
}

impl DispatchSnapshot {
    /// Total number of jobs that went through the dispatcher.
    pub fn jobs(&self) -> u64 {
        self.handed_off + self.absorbed
    }
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            handed_off: self.handed_off.load(Ordering::Relaxed),
            absorbed: self.absorbed.load(Ordering::Relaxed),
            omitted: self.omitted.load(Ordering::Relaxed),
        }
    }
}

/// Receiving ends handed to each worker.
#[derive(Debug, Clone)]
pub struct WorkerChannels {
    pub(crate) jobs: Receiver<Job>,
    /// Never carries a message; disconnects when the dispatcher joins.
    pub(crate) shutdown: Receiver<()>,
}

/// Owns the handoff channel and the completion tracker.
#[derive(Debug)]
pub struct Dispatcher {
    tracker: CompletionTracker,
    handoff: Sender<Job>,
    shutdown: Mutex<Option<Sender<()>>>,
    stats: DispatchStats,
}

impl Dispatcher {
    /// Creates a dispatcher and the channel ends its workers listen on.
    pub fn new() -> (Self, WorkerChannels) {
        let (handoff, jobs) = bounded(0);
        let (shutdown_tx, shutdown) = bounded(0);
        let dispatcher = Self {
            tracker: CompletionTracker::new(),
            handoff,
            shutdown: Mutex::new(Some(shutdown_tx)),
            stats: DispatchStats::default(),
        };
        (dispatcher, WorkerChannels { jobs, shutdown })
    }

    /// Submits a job: hand it to an idle worker, or process it inline.
    ///
    /// When the job is absorbed this call returns only after it (and
    /// everything it absorbed in turn) has finished.
    pub fn enqueue(&self, job: Job) {
        self.tracker.increment();
        match self.handoff.try_send(job) {
            Ok(()) => {
                self.stats.handed_off.fetch_add(1, Ordering::Relaxed);
                trace!("job handed to idle worker");
            }
            Err(TrySendError::Full(job)) | Err(TrySendError::Disconnected(job)) => {
                self.stats.absorbed.fetch_add(1, Ordering::Relaxed);
                trace!(path = %job.path().display(), "no idle worker, processing inline");
                self.run(&job);
            }
        }
    }

    /// Processes one job and then marks it finished, even if processing panics.
    pub(crate) fn run(&self, job: &Node) {
        let _done = CompletionGuard::new(&self.tracker);
        thread_pool::process(self, job);
    }

    /// Blocks until no work is outstanding, then closes the pool.
    ///
    /// Must be called after every root job has been submitted. Once it
    /// returns, every node reachable from the submitted roots is final.
    pub fn join(&self) -> DispatchSnapshot {
        self.tracker.wait_until_zero();
        // dropping the only shutdown sender ends every worker loop
        drop(self.shutdown.lock().take());

        let snapshot = self.stats.snapshot();
        debug!(
            handed_off = snapshot.handed_off,
            absorbed = snapshot.absorbed,
            omitted = snapshot.omitted,
            "traversal complete"
        );
        snapshot
    }

    /// Closes the pool without waiting. Used when a worker fails to start.
    pub(crate) fn close(&self) {
        drop(self.shutdown.lock().take());
    }

    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    pub(crate) fn record_omitted(&self) {
        self.stats.omitted.fetch_add(1, Ordering::Relaxed);
    }
}
