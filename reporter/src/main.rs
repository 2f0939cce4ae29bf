//! # Scan Reporter
//!
//! Aggregates compliance scan summaries into categorized reports.
//!
//! ## Usage
//!
//! ```bash
//! # Report on a single summary
//! scan_reporter summary.json
//!
//! # Report on every summary in a directory
//! scan_reporter /path/to/summaries/
//!
//! # Write the totals only
//! scan_reporter --format summary -o totals.json summary.json
//! ```
//!
//! ## Output Formats
//!
//! - **full** (default): Every report with per-outcome partitions and reference links
//! - **summary**: Rollup totals per report
//!
//! All formats produce a single envelope containing all aggregated reports.

mod cli;
mod config;
mod discovery;
mod output;
mod runner;

use clap::Parser;
use env_logger::Env;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

/// Run the reporter with the parsed arguments
fn run(cli: Cli) -> Result<i32, runner::RunError> {
    let config = cli.into_run_config()?;

    let files = discovery::discover_summary_files(&config.input_path)?;

    if files.is_empty() {
        if !config.quiet {
            println!("No summary files found in: {}", config.input_path.display());
        }
        return Ok(0);
    }

    runner::run_reports(&config, &files)
}
