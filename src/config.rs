//! Explicit configuration values, built once and passed by reference.

use crate::thread_pool::resolve_workers;
use std::path::PathBuf;

/// Settings for the traversal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Number of worker threads, at least 1
    pub workers: usize,
}

impl ScanConfig {
    /// Uses `workers` threads, clamped to at least one.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for ScanConfig {
    /// One worker per logical CPU.
    fn default() -> Self {
        Self {
            workers: resolve_workers(None),
        }
    }
}

/// How much of each tree is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Every file and directory, children before their parent
    #[default]
    Full,
    /// One line per root path
    Summary,
}

/// Settings for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub human_readable: bool,
    pub detail: Detail,
    /// Write CSV to this file instead of the terminal listing
    pub csv: Option<PathBuf>,
}
