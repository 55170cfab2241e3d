//! Node model for the traversal.
//!
//! A [`Node`] is either a regular file or a directory. Both answer the same
//! two questions, [`Node::path`] and [`Node::size`], dispatched by a single
//! `match`.
//!
//! Nodes are shared as `Arc<Node>` between the parent's child list and the
//! job that processes them. Each node is mutated at most once, by the one
//! job that processes it:
//! - a [`FileNode`] has its size materialised from the length captured at
//!   classification time;
//! - a [`DirNode`] has its child list published once expansion finishes.
//!
//! Both writes go through `OnceLock`, so no further locking is needed and
//! reads after [`crate::dispatch::Dispatcher::join`] see the final tree.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// A filesystem object examined by the traversal.
#[derive(Debug)]
pub enum Node {
    File(FileNode),
    Dir(DirNode),
}

/// A regular file. Its size reads as 0 until the file job has run.
#[derive(Debug)]
pub struct FileNode {
    path: PathBuf,
    captured_len: u64,
    size: OnceLock<u64>,
}

/// A directory. Its size is never stored, only summed from its children.
#[derive(Debug)]
pub struct DirNode {
    path: PathBuf,
    children: OnceLock<Vec<Arc<Node>>>,
}

impl FileNode {
    /// Creates an unprocessed file node; `len` comes from the classifier's metadata.
    pub fn new(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            captured_len: len,
            size: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored size in bytes, 0 before [`FileNode::finalize`].
    pub fn size(&self) -> u64 {
        self.size.get().copied().unwrap_or(0)
    }

    /// Sets the size from the captured metadata. Later calls are no-ops.
    pub fn finalize(&self) {
        let _ = self.size.set(self.captured_len);
    }

    pub fn is_finalized(&self) -> bool {
        self.size.get().is_some()
    }
}

impl DirNode {
    /// Creates a directory node with an empty child list.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            children: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Children in listing order; empty until the directory has been expanded.
    pub fn children(&self) -> &[Arc<Node>] {
        self.children.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Publishes the child list built by the expanding job.
    ///
    /// Returns `false` if a list had already been published; the new one is dropped.
    pub fn set_children(&self, children: Vec<Arc<Node>>) -> bool {
        self.children.set(children).is_ok()
    }

    pub fn is_expanded(&self) -> bool {
        self.children.get().is_some()
    }

    /// Recursive sum of all descendant file sizes.
    ///
    /// Walks the subtree with an explicit stack so very deep trees do not
    /// exhaust the thread stack. Not memoised.
    pub fn size(&self) -> u64 {
        let mut total = 0u64;
        let mut pending: Vec<&Node> = self.children().iter().map(Arc::as_ref).collect();
        while let Some(node) = pending.pop() {
            match node {
                Node::File(file) => total = total.saturating_add(file.size()),
                Node::Dir(dir) => pending.extend(dir.children().iter().map(Arc::as_ref)),
            }
        }
        total
    }
}

impl Drop for DirNode {
    /// Unlinks the subtree iteratively; the derived drop would recurse once
    /// per nesting level.
    fn drop(&mut self) {
        let mut pending = self.children.take().unwrap_or_default();
        while let Some(child) = pending.pop() {
            if let Ok(Node::Dir(mut dir)) = Arc::try_unwrap(child) {
                pending.extend(dir.children.take().unwrap_or_default());
            }
        }
    }
}

impl Node {
    pub fn path(&self) -> &Path {
        match self {
            Node::File(file) => file.path(),
            Node::Dir(dir) => dir.path(),
        }
    }

    /// Byte size of the node. Only meaningful once the traversal has joined.
    pub fn size(&self) -> u64 {
        match self {
            Node::File(file) => file.size(),
            Node::Dir(dir) => dir.size(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }

    /// Child nodes of a directory; files have none.
    pub fn children(&self) -> &[Arc<Node>] {
        match self {
            Node::File(_) => &[],
            Node::Dir(dir) => dir.children(),
        }
    }
}
