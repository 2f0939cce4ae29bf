//! Configuration types for the reporter
//!
//! Defines the configuration structures used throughout the CLI.

use std::path::PathBuf;

use clap::ValueEnum;
use report_kit::ReportConfig;

/// Output format for the results file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every aggregated report with partitions and reference links
    Full,
    /// Rollup totals per report only
    Summary,
}

impl OutputFormat {
    /// Get the default output filename for this format
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Full => "report.json",
            OutputFormat::Summary => "summary.json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Full => write!(f, "full"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for a reporter run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input path (file or directory)
    pub input_path: PathBuf,

    /// Output file path (None means console-only output)
    pub output_file: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Suppress console output
    pub quiet: bool,

    /// Aggregation settings
    pub report: ReportConfig,
}

/// Outcome counts of a reporter run
#[derive(Debug)]
pub struct RunSummary {
    /// Summary files found
    pub total_files: usize,

    /// Files aggregated into a report
    pub aggregated: usize,

    /// Files that could not be aggregated
    pub errors: usize,

    /// Total run duration
    pub duration: std::time::Duration,
}

impl RunSummary {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            aggregated: 0,
            errors: 0,
            duration: std::time::Duration::ZERO,
        }
    }

    /// Get the exit code based on results
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            2
        } else {
            0
        }
    }
}
