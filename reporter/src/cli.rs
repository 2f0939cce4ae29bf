//! Command-line interface parsing
//!
//! Handles argument parsing and turns the arguments into a [`RunConfig`].

use std::path::PathBuf;

use clap::Parser;
use report_kit::{DuplicateNamePolicy, ReportConfig};

use crate::config::{OutputFormat, RunConfig};
use crate::runner::RunError;

/// Categorized compliance report from scan summary JSON
#[derive(Parser, Debug)]
#[command(
    name = "scan_reporter",
    version,
    about = "Categorized compliance report from scan summary JSON",
    after_help = "EXIT CODES:\n    0    All summaries aggregated\n    2    Execution error"
)]
pub struct Cli {
    /// Summary JSON file, or a directory of *.json summaries
    pub input: PathBuf,

    /// Write results to a JSON file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Full)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Let later targets take over duplicate friendly names instead of failing
    #[arg(long)]
    pub allow_duplicate_names: bool,

    /// Suppress console output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Validate arguments and load the report configuration
    pub fn into_run_config(self) -> Result<RunConfig, RunError> {
        if !self.input.exists() {
            return Err(RunError::InputNotFound(self.input));
        }

        let mut report = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };
        if self.allow_duplicate_names {
            report = report.with_duplicate_policy(DuplicateNamePolicy::LastWriteWins);
        }

        Ok(RunConfig {
            input_path: self.input,
            output_file: self.output,
            output_format: self.format,
            quiet: self.quiet,
            report,
        })
    }

    /// Default log filter for this invocation
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["scan_reporter", "summary.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("summary.json"));
        assert_eq!(cli.format, OutputFormat::Full);
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "scan_reporter",
            "--format",
            "summary",
            "-o",
            "out.json",
            "--config",
            "report.toml",
            "--allow-duplicate-names",
            "-q",
            "results/",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Summary);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.config, Some(PathBuf::from("report.toml")));
        assert!(cli.allow_duplicate_names);
        assert!(cli.quiet);
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["scan_reporter", "-f", "html", "x.json"]).is_err());
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["scan_reporter"]).is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["scan_reporter", "-q", "-v", "x.json"]).is_err());
    }

    #[test]
    fn test_nonexistent_input_path() {
        let cli =
            Cli::try_parse_from(["scan_reporter", "/nonexistent/scan_reporter/in.json"]).unwrap();
        assert!(matches!(
            cli.into_run_config(),
            Err(RunError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_allow_duplicate_names_sets_policy() {
        let dir = std::env::temp_dir();
        let cli = Cli::try_parse_from([
            OsString::from("scan_reporter"),
            OsString::from("--allow-duplicate-names"),
            dir.into_os_string(),
        ])
        .unwrap();

        let config = cli.into_run_config().unwrap();
        assert_eq!(
            config.report.duplicate_target_names,
            DuplicateNamePolicy::LastWriteWins
        );
    }
}
