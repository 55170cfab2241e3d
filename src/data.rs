//! Flat rows handed to the output renderers.
//!
//! The traversal produces a tree of [`crate::node::Node`]s; once it has
//! joined, [`crate::aggregate::flatten`] turns each root into a list of
//! [`Entry`] values with their sizes already summed.

use std::path::PathBuf;

/// One printable line: a file or a directory with its total size.
///
/// # Fields
/// * `path` - Path as it was reached from the root argument
/// * `size` - Size in bytes (recursive for directories)
/// * `entry_type` - Type of entry (file or directory)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Entry {
    pub path: PathBuf,
    pub size: u64,
    pub entry_type: EntryType,
}

/// Represents the type of file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum EntryType {
    File,
    Dir,
}

impl EntryType {
    /// Returns `"FILE"` or `"DIR"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "FILE",
            EntryType::Dir => "DIR",
        }
    }
}
