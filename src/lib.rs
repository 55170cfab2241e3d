//! Library crate for pardu
//!
//! Computes the recursive byte size of filesystem paths, expanding
//! directories in parallel over a fixed worker pool.
//!
//! # Modules
//!
//! - [`node`]: the file/directory node model
//! - [`classify`]: path → node, one metadata query
//! - [`tracker`]: outstanding-work counter with a blocking wait for zero
//! - [`dispatch`]: hand a job to an idle worker or run it inline
//! - [`thread_pool`]: the fixed worker pool and job processing
//! - [`aggregate`]: size queries over the finished tree
//! - [`scan`]: the end-to-end traversal of a list of roots
//! - [`output`], [`data`], [`utils`]: presentation of the results
//! - [`cli`], [`config`], [`error`]: arguments, settings, errors
//!
//! # Example
//!
//! ```no_run
//! use pardu::{ScanConfig, scan_paths};
//!
//! let report = scan_paths(&["/var/log"], &ScanConfig::default()).unwrap();
//! println!("{}", report.total());
//! ```

pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod node;
pub mod output;
pub mod scan;
pub mod thread_pool;
pub mod tracker;
pub mod utils;

pub use cli::Args;
pub use config::{Detail, OutputConfig, ScanConfig};
pub use data::{Entry, EntryType};
pub use error::{ScanError, ScanResult};
pub use node::Node;
pub use scan::{ScanReport, scan_paths};
