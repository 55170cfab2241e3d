//! Output renderers for a finished scan.
//!
//! # Available Formatters
//!
//! - **Terminal**: `SIZE<TAB>PATH` lines plus a `Total` line
//! - **CSV**: one record per entry, for scripting and spreadsheets
//!
//! Both take entries produced by [`crate::aggregate::flatten`] and hold no
//! business logic of their own.

pub mod csv;
pub mod terminal;

pub use self::csv::render as render_csv;
pub use self::terminal::render as render_terminal;
