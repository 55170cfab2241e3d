//! CLI interface definitions for `pardu`.
//!
//! [`Args`] is parsed with [`clap`] and converted into the explicit
//! [`ScanConfig`] and [`OutputConfig`] values the library works with.
//!
//! # Example
//!
//! ```bash
//! pardu -sh ~/src /var/log --threads 4
//! ```

use crate::config::{Detail, OutputConfig, ScanConfig};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments for the `pardu` disk usage calculator.
#[derive(Parser, Debug)]
#[command(name = "pardu", version, about, disable_help_flag = true)]
pub struct Args {
    /// Paths to measure (defaults to the current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Print only one total per given path
    #[arg(short = 's', long = "summarize", default_value_t = false)]
    pub summarize: bool,

    /// Print sizes in human readable form (e.g. 1.500 kB)
    #[arg(short = 'h', long = "human-readable", default_value_t = false)]
    pub human_readable: bool,

    /// Number of worker threads (default: use all available CPUs)
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Write output to a CSV file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show a spinner on stderr while scanning
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Args {
    pub fn scan_config(&self) -> ScanConfig {
        match self.threads {
            Some(n) => ScanConfig::with_workers(usize::try_from(n).unwrap_or(usize::MAX)),
            None => ScanConfig::default(),
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            human_readable: self.human_readable,
            detail: if self.summarize {
                Detail::Summary
            } else {
                Detail::Full
            },
            csv: self.output.clone(),
        }
    }
}
