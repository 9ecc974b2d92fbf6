//! # Flight-Log Extraction
//!
//! Reads flight-log CSV exports and extracts the free-text app messages
//! (`APP.tip`, `APP.warning`) together with their timeline position. The
//! exports open with a `sep=,` preamble line and carry hundreds of telemetry
//! columns; only four matter here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

const DATE_COLUMN: &str = "CUSTOM.date [local]";
const TIME_COLUMN: &str = "CUSTOM.updateTime [local]";
const TIP_COLUMN: &str = "APP.tip";
const WARNING_COLUMN: &str = "APP.warning";

/// One extracted app message with its timeline position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub date: String,
    pub time: String,
    /// Which app column the message came from: `tip` or `warning`.
    pub message_type: String,
    pub message: String,
}

/// Loads a flight log and extracts one record per non-empty app message.
///
/// A telemetry row carrying both a tip and a warning yields two records, tip
/// first, matching the export's column order.
pub fn load_and_extract_log(path: &Path) -> Result<Vec<LogRecord>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    extract_records(&raw).with_context(|| format!("extracting {}", path.display()))
}

/// Parses raw export text; separated from file access for testing.
fn extract_records(raw: &str) -> Result<Vec<LogRecord>> {
    // Exports start with a `sep=,` hint line that is not CSV data.
    let body = match raw.split_once('\n') {
        Some((first, rest))
            if first
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case("sep=,") =>
        {
            rest
        }
        _ => raw,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let date_idx = find_column(&headers, DATE_COLUMN)?;
    let time_idx = find_column(&headers, TIME_COLUMN)?;
    let tip_idx = find_column(&headers, TIP_COLUMN)?;
    let warning_idx = find_column(&headers, WARNING_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let date = cell(&row, date_idx);
        let time = cell(&row, time_idx);

        for (idx, kind) in [(tip_idx, "tip"), (warning_idx, "warning")] {
            let message = cell(&row, idx);
            if !message.is_empty() {
                records.push(LogRecord {
                    date: date.clone(),
                    time: time.clone(),
                    message_type: kind.to_string(),
                    message,
                });
            }
        }
    }

    Ok(records)
}

/// Finds a column by trimmed, case-insensitive header match.
fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .with_context(|| format!("column {name:?} not found in log header"))
}

fn cell(row: &csv::StringRecord, idx: usize) -> String {
    row.get(idx).unwrap_or_default().trim().to_string()
}
