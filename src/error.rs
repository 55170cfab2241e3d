//! Error types for `pardu`.
//!
//! Every variant except [`ScanError::WorkerSpawn`] is non-fatal to a
//! traversal: a failing child entry is dropped from its parent, a failing
//! root is reported on its own while its siblings carry on.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the library.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors raised while classifying or expanding filesystem entries.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The path does not exist (or vanished before it could be examined).
    #[error("cannot access '{}': No such file or directory", path.display())]
    NotFound { path: PathBuf },

    /// Metadata could not be read because access was refused.
    #[error("cannot access '{}': Permission denied", path.display())]
    PermissionDenied { path: PathBuf },

    /// A directory was classified but its entries could not be listed.
    #[error("cannot read directory '{}': {source}", path.display())]
    ListingFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other metadata failure.
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    WorkerSpawn {
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Wraps a metadata error, mapping the well-known kinds onto their own variants.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Wraps a failure to list an already classified directory.
    pub fn listing(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ListingFailure {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly tag for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::NotFound { .. } => "not_found",
            ScanError::PermissionDenied { .. } => "permission_denied",
            ScanError::ListingFailure { .. } => "listing_failure",
            ScanError::Io { .. } => "io",
            ScanError::WorkerSpawn { .. } => "worker_spawn",
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ScanError::NotFound { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ListingFailure { path, .. }
            | ScanError::Io { path, .. } => Some(path),
            ScanError::WorkerSpawn { .. } => None,
        }
    }
}
