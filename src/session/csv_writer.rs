//! CSV writer for reported choices.
//!
//! Writes choices to a CSV file in append-only mode for crash safety.
//! Each row contains: frame, timestamp, elapsed milliseconds, and the label.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::session::worker::ChoiceRecord;

/// CSV header row.
const CSV_HEADER: &str = "frame,timestamp,elapsed_ms,label";

/// Initializes CSV file with header if it doesn't exist or is empty.
///
/// If the file exists and has content, this does nothing (preserves existing data).
pub fn init_csv(path: &Path) -> Result<()> {
    if path.exists() {
        let file = File::open(path).context("Failed to open existing CSV")?;
        let reader = BufReader::new(file);
        if reader.lines().next().is_some() {
            return Ok(());
        }
    }

    let mut file = File::create(path).context("Failed to create CSV file")?;
    writeln!(file, "{}", CSV_HEADER).context("Failed to write CSV header")?;
    Ok(())
}

/// Quotes a field if it contains a separator, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Appends one choice row to the CSV file.
///
/// Opens the file in append mode for each write, so earlier rows survive a crash.
pub fn append_choice(path: &Path, record: &ChoiceRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("Failed to open CSV for append")?;

    let line = format!(
        "{},{},{},{}",
        record.frame,
        record.captured_at.format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.elapsed.as_millis(),
        escape_field(&record.label),
    );

    writeln!(file, "{}", line).context("Failed to write CSV row")?;
    Ok(())
}
