//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

pub use countup_core::format::{format_number, format_value};
use countup_core::StatEntry;

/// Format a strip entry as shown on the page, e.g. `12,000+`.
#[must_use]
pub fn format_stat(value: f64, entry: &StatEntry) -> String {
    entry.display(value)
}

/// Format a frame timestamp for display.
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms < 1000.0 {
        format!("{ms:>4.0}ms")
    } else {
        format!("{:>5.2}s", d.as_secs_f64())
    }
}

/// Render one line with every counter of the strip.
#[must_use]
pub fn format_strip_line(entries: &[StatEntry], values: &[f64]) -> String {
    entries
        .iter()
        .zip(values)
        .map(|(entry, value)| format!("{} {}", entry.label, format_stat(*value, entry)))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[derive(Serialize)]
struct FinalStat<'a> {
    label: &'a str,
    value: f64,
    display: String,
}

/// Write the final strip values to a JSON file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, entries: &[StatEntry], values: &[f64]) -> io::Result<()> {
    let stats: Vec<FinalStat<'_>> = entries
        .iter()
        .zip(values)
        .map(|(entry, value)| FinalStat {
            label: &entry.label,
            value: *value,
            display: format_stat(*value, entry),
        })
        .collect();
    let json = serde_json::to_string_pretty(&serde_json::json!({ "stats": stats }))
        .map_err(io::Error::other)?;
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{json}")?;
    Ok(())
}
