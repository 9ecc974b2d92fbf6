//! # Output Sinks
//!
//! Serializes segmented records to the two supported sinks: a flat CSV table
//! with one row per sentence, and a JSON document that keeps each record's
//! sentences nested.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::input::LogRecord;

/// Output format of a processed log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Flat table, one row per sentence, record columns duplicated.
    Csv,
    /// Array of records, each keeping its sentences as a nested list.
    Json,
}

impl OutputFormat {
    /// Output file name for one processed log, derived from its stem.
    pub fn output_name(&self, stem: &str) -> String {
        match self {
            OutputFormat::Csv => format!("{stem}_processed.csv"),
            OutputFormat::Json => format!("{stem}.json"),
        }
    }
}

/// A log record joined with the sentences segmented out of its message.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentedRecord {
    pub date: String,
    pub time: String,
    pub message: String,
    pub sentence: Vec<String>,
}

impl SegmentedRecord {
    pub fn new(record: LogRecord, sentences: Vec<String>) -> Self {
        Self {
            date: record.date,
            time: record.time,
            message: record.message,
            sentence: sentences,
        }
    }
}

/// Writes the records to `path` in the requested format.
pub fn write_output(path: &Path, format: OutputFormat, records: &[SegmentedRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        OutputFormat::Csv => write_csv(file, records),
        OutputFormat::Json => write_json(file, records),
    }
    .with_context(|| format!("writing {}", path.display()))
}

/// Writes the flat table: one row per sentence, record columns duplicated.
///
/// A record whose message produced no sentences still appears, with an empty
/// sentence cell, so no timeline entry is lost.
pub fn write_csv<W: Write>(writer: W, records: &[SegmentedRecord]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["date", "time", "message", "sentence"])?;

    for record in records {
        if record.sentence.is_empty() {
            out.write_record([
                record.date.as_str(),
                record.time.as_str(),
                record.message.as_str(),
                "",
            ])?;
            continue;
        }
        for sentence in &record.sentence {
            out.write_record([
                record.date.as_str(),
                record.time.as_str(),
                record.message.as_str(),
                sentence.as_str(),
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes the nested document: an array of records, sentence lists intact.
pub fn write_json<W: Write>(writer: W, records: &[SegmentedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}
