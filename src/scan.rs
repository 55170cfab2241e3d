//! Top-level traversal of one or more root paths.
//!
//! [`scan_paths`] wires the pieces together:
//! - classify each root in argument order on a submitter thread whose
//!   stack matches the workers' ([`WORKER_STACK_SIZE`]), since a root
//!   absorbed there is expanded recursively;
//! - submit every root to the [`WorkerPool`]'s dispatcher;
//! - join, which blocks until the whole forest is sized;
//! - hand the finished roots (and any root failures) back to the caller.
//!
//! A root that fails classification is recorded in
//! [`ScanReport::failures`] and does not affect its siblings.

use crate::aggregate::total_size;
use crate::classify::classify;
use crate::config::ScanConfig;
use crate::dispatch::{DispatchSnapshot, Dispatcher};
use crate::error::{ScanError, ScanResult};
use crate::node::Node;
use crate::thread_pool::{WORKER_STACK_SIZE, WorkerPool};
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// The finished forest plus everything that went wrong at the roots.
#[derive(Debug)]
pub struct ScanReport {
    /// Successfully classified roots, in argument order
    pub roots: Vec<Arc<Node>>,
    /// Roots whose metadata could not be read, in argument order
    pub failures: Vec<ScanError>,
    /// How the jobs were spread between workers and submitters
    pub stats: DispatchSnapshot,
}

impl ScanReport {
    /// Sum of every root's size.
    pub fn total(&self) -> u64 {
        total_size(&self.roots)
    }
}

/// Computes recursive sizes for `paths` on a fresh worker pool.
///
/// # Errors
/// Only [`ScanError::WorkerSpawn`]. Per-path problems end up in
/// [`ScanReport::failures`] or are silently left out of the totals.
pub fn scan_paths<P>(paths: &[P], config: &ScanConfig) -> ScanResult<ScanReport>
where
    P: Into<PathBuf> + Clone,
{
    let paths: Vec<PathBuf> = paths.iter().cloned().map(Into::into).collect();
    let pool = WorkerPool::new(config)?;
    let dispatcher = pool.dispatcher();

    let (roots, failures) = thread::scope(|scope| -> ScanResult<_> {
        let submitter = thread::Builder::new()
            .name("pardu-submit".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn_scoped(scope, move || submit_roots(dispatcher, paths))
            .map_err(|source| ScanError::WorkerSpawn { source })?;
        match submitter.join() {
            Ok(submitted) => Ok(submitted),
            Err(payload) => panic::resume_unwind(payload),
        }
    })?;

    let stats = pool.join();
    Ok(ScanReport {
        roots,
        failures,
        stats,
    })
}

/// Classifies and enqueues each root, keeping failures apart.
fn submit_roots(
    dispatcher: &Dispatcher,
    paths: Vec<PathBuf>,
) -> (Vec<Arc<Node>>, Vec<ScanError>) {
    let mut roots = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match classify(&path) {
            Ok(Some(node)) => {
                let root = Arc::new(node);
                roots.push(Arc::clone(&root));
                dispatcher.enqueue(root);
            }
            Ok(None) => debug!(path = %path.display(), "root is neither a file nor a directory"),
            Err(err) => {
                debug!(error = %err, "root failed");
                failures.push(err);
            }
        }
    }
    (roots, failures)
}
