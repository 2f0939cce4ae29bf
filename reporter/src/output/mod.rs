//! Output generation module
//!
//! Provides builders for the results file and the console:
//! - Full reports with partitions and reference links
//! - Summary (rollup totals only)
//! - Console (human-readable)
//!
//! ## Hash Architecture
//!
//! The full format carries a `content_hash` over the serialized reports
//! array. It is computed once from the exact bytes that land under
//! `reports`, so a consumer can re-serialize that array and compare.
//!
//! ```text
//! ReportEntry[] ──► FullReport[] ──► serde_json bytes ──► sha256 ──► envelope.content_hash
//! ```

mod console;
mod full;
mod summary;

pub use console::{print_progress_result, print_results};
pub use full::build_full_output;
pub use summary::build_summary;

use std::path::PathBuf;

use report_kit::{ReferenceLinker, ReportModel};
use sha2::{Digest, Sha256};

use crate::config::OutputFormat;

/// Name reported in output envelopes
pub const TOOL_NAME: &str = "scan-reporter";

/// An aggregated report and the file it came from
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub source: PathBuf,
    pub model: ReportModel,
}

/// Build output in the specified format
pub fn build_output(
    entries: &[ReportEntry],
    format: OutputFormat,
    linker: &ReferenceLinker,
) -> Result<String, OutputError> {
    let json = match format {
        OutputFormat::Full => {
            let output = build_full_output(entries, linker)?;
            serde_json::to_string_pretty(&output)?
        }
        OutputFormat::Summary => {
            let output = build_summary(entries);
            serde_json::to_string_pretty(&output)?
        }
    };
    Ok(json)
}

// ============================================================================
// Hash Helpers
// ============================================================================

/// `sha256:<hex>` digest of `bytes`
pub(crate) fn content_hash(bytes: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(bytes)))
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur during output generation
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to build result
    #[error("Failed to build output: {0}")]
    Build(String),
    /// Failed to serialize result
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
