//! Command-line front end: walks a directory of flight-log exports, runs the
//! segmentation pipeline over every extracted message, and writes one
//! processed file per log. A log that fails to parse is skipped with a
//! warning; the batch keeps going.

mod input;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use logseg_core::{RuleTagger, SegmentationPipeline};
use tracing::{info, warn};

use crate::input::load_and_extract_log;
use crate::output::{write_output, OutputFormat, SegmentedRecord};

/// Sentence segmentation for noisy drone flight logs.
#[derive(Debug, Parser)]
#[command(name = "logseg", version, about)]
struct Args {
    /// Directory containing flight-log CSV exports.
    #[arg(short, long, value_name = "DIR", default_value = "./evidence")]
    input_dir: PathBuf,

    /// Directory the processed logs are written to.
    #[arg(short, long, value_name = "DIR", default_value = "./output")]
    output_dir: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    if !args.input_dir.is_dir() {
        bail!("input directory {} does not exist", args.input_dir.display());
    }
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let logs = find_logs(&args.input_dir)?;
    if logs.is_empty() {
        warn!("no log files found in {}", args.input_dir.display());
        return Ok(());
    }
    info!("found {} log file(s)", logs.len());

    let pipeline = SegmentationPipeline::new(RuleTagger::new());
    let progress = ProgressBar::new(logs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")?.progress_chars("=> "),
    );
    progress.set_message("Processing");

    let mut processed = 0usize;
    for log in &logs {
        match process_log(&pipeline, log, &args) {
            Ok(()) => processed += 1,
            Err(err) => warn!("skipping {}: {err:#}", log.display()),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(
        "completed {processed}/{} file(s); results in {}",
        logs.len(),
        args.output_dir.display()
    );
    Ok(())
}

/// Flight-log exports directly under the input directory, in name order.
fn find_logs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if path.is_file() && is_csv {
            logs.push(path);
        }
    }
    logs.sort();
    Ok(logs)
}

fn process_log(
    pipeline: &SegmentationPipeline<RuleTagger>,
    log: &Path,
    args: &Args,
) -> Result<()> {
    let records = load_and_extract_log(log)?;
    let warnings = records
        .iter()
        .filter(|r| r.message_type == "warning")
        .count();
    info!(
        "{}: {} message(s), {warnings} warning(s)",
        log.display(),
        records.len()
    );

    let messages: Vec<String> = records.iter().map(|r| r.message.clone()).collect();
    let rows = pipeline.segment_batch(&messages)?;

    let segmented: Vec<SegmentedRecord> = records
        .into_iter()
        .zip(rows)
        .map(|(record, sentences)| SegmentedRecord::new(record, sentences))
        .collect();

    let stem = log.file_stem().and_then(|s| s.to_str()).unwrap_or("log");
    let out_path = args.output_dir.join(args.format.output_name(stem));
    write_output(&out_path, args.format, &segmented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_find_logs_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["FLY012.csv", "FLY013.CSV", "notes.txt", "model.json"] {
            fs::File::create(dir.path().join(name)).unwrap();
        }
        let logs = find_logs(dir.path()).unwrap();
        let names: Vec<&str> = logs
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["FLY012.csv", "FLY013.CSV"]);
    }

    #[test]
    fn test_process_log_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("FLY001.csv");
        let mut file = fs::File::create(&log_path).unwrap();
        writeln!(file, "sep=,").unwrap();
        writeln!(
            file,
            "CUSTOM.date [local],CUSTOM.updateTime [local],APP.tip,APP.warning"
        )
        .unwrap();
        writeln!(file, "2023-10-04,10:21:05.331,Takeoff complete. Climbing,").unwrap();

        let args = Args {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            format: OutputFormat::Json,
        };
        fs::create_dir_all(&args.output_dir).unwrap();

        let pipeline = SegmentationPipeline::new(RuleTagger::new());
        process_log(&pipeline, &log_path, &args).unwrap();

        let written = fs::read_to_string(args.output_dir.join("FLY001.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value[0]["sentence"][0], "Takeoff complete");
        assert_eq!(value[0]["sentence"][1], "Climbing");
    }
}
