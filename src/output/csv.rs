//! CSV output formatter for scan results.

use crate::data::Entry;
use crate::utils::human_size;
use anyhow::Result;
use csv::Writer;
use std::io::Write;

/// A single CSV record.
///
/// # Fields
/// * `entry_type` - "DIR" or "FILE"
/// * `size_bytes` - Size in bytes
/// * `size_human` - Human-readable size (e.g., "1.500 kB")
/// * `path` - Path of the file or directory
#[derive(Debug, serde::Serialize)]
pub struct CsvEntry<'a> {
    pub entry_type: &'static str,
    pub size_bytes: u64,
    pub size_human: String,
    pub path: std::borrow::Cow<'a, str>,
}

impl<'a> From<&'a Entry> for CsvEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        CsvEntry {
            entry_type: entry.entry_type.as_str(),
            size_bytes: entry.size,
            size_human: human_size(entry.size),
            path: entry.path.to_string_lossy(),
        }
    }
}

/// Serialises already-flattened entries, header first.
pub fn render<W: Write>(out: W, entries: &[Entry]) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    for entry in entries {
        writer.serialize(CsvEntry::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}
