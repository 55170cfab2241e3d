//! Fixed-size worker pool draining the dispatcher's handoff channel.
//!
//! The pool is sized once from [`ScanConfig::workers`] (CPU count by
//! default, never below one) and never resized. Each worker parks on the
//! handoff channel; that is the only place a worker ever waits.
//!
//! Processing a job:
//! - **File**: the size captured at classification time is materialised.
//! - **Directory**: entries are listed, sorted by name, classified one by
//!   one, and each child is appended to this directory's list and submitted
//!   through [`Dispatcher::enqueue`]. Unreadable directories and failing
//!   entries are dropped silently; the directory simply ends up smaller.

use crate::classify::classify;
use crate::config::ScanConfig;
use crate::dispatch::{DispatchSnapshot, Dispatcher, Job, WorkerChannels};
use crate::error::{ScanError, ScanResult};
use crate::node::{DirNode, Node};
use crossbeam_channel::select;
use std::fs;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Stack size for workers and for the thread that submits roots.
///
/// An absorbed directory job recurses on the absorbing thread, one set of
/// frames per nesting level. Absolute paths are capped at 4096 bytes on
/// Linux, so a tree can nest at most about 2048 directories deep before
/// listing fails; 64 MiB leaves over 32 KiB per level, which covers an
/// unoptimised build.
pub const WORKER_STACK_SIZE: usize = 64 << 20;

/// Resolves the worker count: an explicit request, or every logical CPU.
pub fn resolve_workers(requested: Option<usize>) -> usize {
    requested.unwrap_or_else(num_cpus::get).max(1)
}

/// A running pool of workers sharing one [`Dispatcher`].
pub struct WorkerPool {
    dispatcher: Arc<Dispatcher>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Starts `config.workers` worker threads.
    ///
    /// # Errors
    /// [`ScanError::WorkerSpawn`] if a thread cannot be started. Workers
    /// that did start are shut down before the error is returned.
    pub fn new(config: &ScanConfig) -> ScanResult<Self> {
        let (dispatcher, channels) = Dispatcher::new();
        let dispatcher = Arc::new(dispatcher);
        let workers = config.workers.max(1);

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let dispatcher_ref = Arc::clone(&dispatcher);
            let channels = channels.clone();
            let spawned = thread::Builder::new()
                .name(format!("pardu-worker-{id}"))
                .stack_size(WORKER_STACK_SIZE)
                .spawn(move || worker_loop(id, &dispatcher_ref, &channels));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    dispatcher.close();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(ScanError::WorkerSpawn { source });
                }
            }
        }

        debug!(workers, "worker pool started");
        Ok(Self {
            dispatcher,
            handles,
        })
    }

    /// The dispatcher roots are submitted to.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Number of worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Waits for all outstanding work, then stops every worker.
    pub fn join(mut self) -> DispatchSnapshot {
        let snapshot = self.dispatcher.join();
        for handle in std::mem::take(&mut self.handles) {
            // a panicking job still released its count while unwinding, but
            // its subtree is only partly sized
            if handle.join().is_err() {
                debug!("worker thread panicked");
            }
        }
        snapshot
    }
}

impl Drop for WorkerPool {
    /// Stops idle workers even when the pool is dropped without joining.
    fn drop(&mut self) {
        self.dispatcher.close();
    }
}

fn worker_loop(id: usize, dispatcher: &Dispatcher, channels: &WorkerChannels) {
    trace!(worker = id, "worker started");
    loop {
        select! {
            recv(channels.jobs) -> job => match job {
                Ok(job) => dispatcher.run(&job),
                Err(_) => break,
            },
            recv(channels.shutdown) -> _ => break,
        }
    }
    trace!(worker = id, "worker stopped");
}

/// Does the job's own work. Called by workers and by absorbing submitters.
pub(crate) fn process(dispatcher: &Dispatcher, job: &Node) {
    match job {
        Node::File(file) => file.finalize(),
        Node::Dir(dir) => expand(dispatcher, dir),
    }
}

fn expand(dispatcher: &Dispatcher, dir: &DirNode) {
    let entries = match fs::read_dir(dir.path()) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(error = %ScanError::listing(dir.path(), err), "directory left empty");
            dir.set_children(Vec::new());
            return;
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(err) => {
                dispatcher.record_omitted();
                debug!(error = %ScanError::listing(dir.path(), err), "entry omitted");
            }
        }
    }
    paths.sort_unstable();

    let mut children: Vec<Job> = Vec::with_capacity(paths.len());
    for path in paths {
        match classify(path) {
            Ok(Some(node)) => {
                let child = Arc::new(node);
                children.push(Arc::clone(&child));
                dispatcher.enqueue(child);
            }
            Ok(None) => {}
            Err(err) => {
                dispatcher.record_omitted();
                debug!(error = %err, "entry omitted");
            }
        }
    }

    dir.set_children(children);
}
