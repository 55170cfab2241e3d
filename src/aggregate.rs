//! Size queries over a finished node forest.
//!
//! Everything here assumes the traversal has joined. Called earlier, sizes
//! undercount because parts of the tree are still being expanded.

use crate::config::Detail;
use crate::data::{Entry, EntryType};
use crate::node::Node;
use std::sync::Arc;

/// Sum of the sizes of every root.
pub fn total_size(roots: &[Arc<Node>]) -> u64 {
    roots
        .iter()
        .fold(0u64, |total, root| total.saturating_add(root.size()))
}

/// Lists `root` as printable rows.
///
/// `Detail::Full` yields every node in post-order, children before their
/// directory and siblings in listing order. `Detail::Summary` yields only
/// the root.
pub fn flatten(root: &Node, detail: Detail) -> Vec<Entry> {
    match detail {
        Detail::Summary => vec![entry(root, root.size())],
        Detail::Full => post_order(root),
    }
}

/// Directory on the walk stack: next child to visit and the sum so far.
struct Frame<'a> {
    node: &'a Node,
    next: usize,
    size: u64,
}

/// Explicit-stack post-order walk; each directory is summed once.
fn post_order(root: &Node) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut stack = vec![Frame {
        node: root,
        next: 0,
        size: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if let Some(child) = node.children().get(frame.next) {
            frame.next += 1;
            stack.push(Frame {
                node: child,
                next: 0,
                size: 0,
            });
            continue;
        }

        let size = match node {
            Node::File(file) => file.size(),
            Node::Dir(_) => frame.size,
        };
        stack.pop();
        entries.push(entry(node, size));
        if let Some(parent) = stack.last_mut() {
            parent.size = parent.size.saturating_add(size);
        }
    }
    entries
}

fn entry(node: &Node, size: u64) -> Entry {
    Entry {
        path: node.path().to_path_buf(),
        size,
        entry_type: if node.is_dir() {
            EntryType::Dir
        } else {
            EntryType::File
        },
    }
}
