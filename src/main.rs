//! Main entry point for the `pardu` CLI application.
//!
//! `pardu` reports the recursive byte size of each given path, the way
//! `du -b` does, expanding directories in parallel over a worker pool.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Installs the `tracing` subscriber (stderr, `RUST_LOG` aware)
//! - Delegates traversal to [`pardu::scan_paths`]
//! - Prints per-entry lines (or one line per root with `-s`), then a total,
//!   or writes CSV with `--output`
//!
//! Root paths that cannot be read are reported on stderr; the others are
//! still printed and the process exits with status 1.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pardu::aggregate::flatten;
use pardu::output::{csv, terminal};
use pardu::{Args, Entry, OutputConfig, ScanReport, scan_paths};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "pardu=warn",
        1 => "pardu=debug",
        _ => "pardu=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

/// Spinner on stderr while the traversal runs.
fn start_spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} Scanning files... [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn collect_entries(report: &ScanReport, config: &OutputConfig) -> Vec<Entry> {
    report
        .roots
        .iter()
        .flat_map(|root| flatten(root, config.detail))
        .collect()
}

fn output_results(report: &ScanReport, config: &OutputConfig) -> Result<()> {
    let entries = collect_entries(report, config);

    if let Some(csv_path) = &config.csv {
        let file = File::create(csv_path)
            .with_context(|| format!("Failed to create {}", csv_path.display()))?;
        csv::render(BufWriter::new(file), &entries)?;
        eprintln!("Output saved to: {}", csv_path.display());
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    terminal::render(&mut out, &entries, config)?;
    terminal::render_total(&mut out, report.total(), config)?;
    out.flush().context("Failed to write output")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let scan_config = args.scan_config();
    let output_config = args.output_config();
    debug!(workers = scan_config.workers, "starting scan");

    let spinner = if args.progress {
        Some(start_spinner()?)
    } else {
        None
    };
    let report = scan_paths(&args.paths, &scan_config);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = report.context("Scan failed")?;

    for failure in &report.failures {
        eprintln!("ERROR: {failure}");
    }
    debug!(
        handed_off = report.stats.handed_off,
        absorbed = report.stats.absorbed,
        omitted = report.stats.omitted,
        "dispatch summary"
    );

    output_results(&report, &output_config)?;

    Ok(if report.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
