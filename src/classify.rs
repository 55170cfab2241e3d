//! Turns a path into a [`Node`] with a single metadata query.
//!
//! Links are never followed: `symlink_metadata` is used, so a symlink is
//! neither a directory nor a regular file and is excluded along with
//! devices, sockets and FIFOs.

use crate::error::{ScanError, ScanResult};
use crate::node::{DirNode, FileNode, Node};
use std::fs;
use std::path::PathBuf;
use tracing::trace;

/// Classifies `path`.
///
/// # Returns
/// * `Ok(Some(Node::Dir))` with an empty child list for a directory
/// * `Ok(Some(Node::File))` with the length captured for a regular file
/// * `Ok(None)` for every other file type
///
/// # Errors
/// [`ScanError::NotFound`], [`ScanError::PermissionDenied`] or
/// [`ScanError::Io`] when the metadata cannot be read.
pub fn classify(path: impl Into<PathBuf>) -> ScanResult<Option<Node>> {
    let path = path.into();
    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) => return Err(ScanError::io(path, err)),
    };

    let file_type = metadata.file_type();
    if file_type.is_dir() {
        Ok(Some(Node::Dir(DirNode::new(path))))
    } else if file_type.is_file() {
        Ok(Some(Node::File(FileNode::new(path, metadata.len()))))
    } else {
        trace!(path = %path.display(), "skipping non-regular entry");
        Ok(None)
    }
}
