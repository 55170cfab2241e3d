//! Terminal output formatter: one `SIZE<TAB>PATH` line per entry.

use crate::config::OutputConfig;
use crate::data::Entry;
use crate::utils::display_size;
use std::io::{self, Write};

/// Writes one line per entry.
///
/// Entries arrive already flattened and ordered; this only formats them.
pub fn render<W: Write>(out: &mut W, entries: &[Entry], config: &OutputConfig) -> io::Result<()> {
    for entry in entries {
        writeln!(
            out,
            "{}\t{}",
            display_size(entry.size, config.human_readable),
            entry.path.display()
        )?;
    }
    Ok(())
}

/// Writes the aggregate line across every root.
pub fn render_total<W: Write>(out: &mut W, total: u64, config: &OutputConfig) -> io::Result<()> {
    writeln!(out, "{}\tTotal", display_size(total, config.human_readable))
}
