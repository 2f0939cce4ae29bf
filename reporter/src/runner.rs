//! Core reporting logic
//!
//! Aggregates each discovered summary file and collects the reports.

use std::path::{Path, PathBuf};
use std::time::Instant;

use report_kit::report_api::{build_report_with_logging, format_summary};
use report_kit::{ReferenceLinker, ReportError};

use crate::config::{RunConfig, RunSummary};
use crate::discovery::DiscoveryError;
use crate::output::{self, OutputError, ReportEntry};

/// Aggregate every summary file and emit the results
pub fn run_reports(config: &RunConfig, files: &[PathBuf]) -> Result<i32, RunError> {
    let start = Instant::now();

    log::info!("Starting report run: file_count={}", files.len());
    if !config.quiet {
        println!();
        println!("Scan Reporter v{}", env!("CARGO_PKG_VERSION"));
        println!("Aggregating {} summary file(s)...", files.len());
        println!();
    }

    let linker = config.report.reference_linker();

    let (entries, mut summary) = aggregate_files(files, config);
    summary.duration = start.elapsed();

    if !config.quiet {
        output::print_results(&entries, &linker);
        print_execution_info(&summary, config);
    }

    // Build and save output file only if explicitly requested
    if let Some(requested) = &config.output_file {
        if !entries.is_empty() {
            let path = save_output(&entries, config, &linker, requested)?;
            if !config.quiet {
                println!("Results saved to: {}", path.display());
                println!();
            }
        }
    }

    log::info!(
        "Report run completed: total={} aggregated={} errors={} duration_ms={}",
        summary.total_files,
        summary.aggregated,
        summary.errors,
        summary.duration.as_millis()
    );

    Ok(summary.exit_code())
}

/// Build a report from each file; failures are counted, not fatal
fn aggregate_files(files: &[PathBuf], config: &RunConfig) -> (Vec<ReportEntry>, RunSummary) {
    let mut entries = Vec::with_capacity(files.len());
    let mut summary = RunSummary::new(files.len());

    for (index, file) in files.iter().enumerate() {
        let file_num = index + 1;

        match build_report_with_logging(file, &config.report) {
            Ok(model) => {
                summary.aggregated += 1;
                log::info!("{}: {}", file.display(), format_summary(&model));

                let entry = ReportEntry {
                    source: file.clone(),
                    model,
                };
                if !config.quiet {
                    output::print_progress_result(file_num, files.len(), &entry);
                }
                entries.push(entry);
            }
            Err(e) => {
                summary.errors += 1;
                if !config.quiet {
                    println!(
                        "[{}/{}] \x1b[31m✗\x1b[0m {} (ERROR: {})",
                        file_num,
                        files.len(),
                        file.display(),
                        e
                    );
                }
                log::error!(
                    "Aggregation failed: file={} error={}",
                    file.display(),
                    e
                );
            }
        }
    }

    (entries, summary)
}

/// Save output to file. A directory target gets the format's default filename.
fn save_output(
    entries: &[ReportEntry],
    config: &RunConfig,
    linker: &ReferenceLinker,
    requested: &Path,
) -> Result<PathBuf, RunError> {
    let path = if requested.is_dir() {
        requested.join(config.output_format.default_filename())
    } else {
        requested.to_path_buf()
    };

    let json = output::build_output(entries, config.output_format, linker)?;

    std::fs::write(&path, json).map_err(|source| RunError::WriteFile {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Print execution information
fn print_execution_info(summary: &RunSummary, config: &RunConfig) {
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!(
        "  Files:        {} aggregated, {} failed",
        summary.aggregated, summary.errors
    );
    println!("  Duration:     {:.2}s", summary.duration.as_secs_f64());
    if let Some(output_path) = &config.output_file {
        println!(
            "  Output:       {} ({})",
            output_path.display(),
            config.output_format
        );
    }
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!();
}

/// Errors that stop a reporter run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Input path does not exist
    #[error("Input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ReportError),
    /// Input discovery failed
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),
    /// Failed to generate output
    #[error("Output generation failed: {0}")]
    Output(#[from] OutputError),
    /// Failed to write output file
    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
