//! Error type for report building
//!
//! Aggregation itself degrades gracefully (targets without results are
//! treated as errored, missing references as empty). The variants here cover
//! the cases that cannot be repaired: unreadable or structurally incomplete
//! input, out-of-range outcome ordinals, ragged result vectors, and target
//! names that would make cross-links ambiguous.

use std::path::PathBuf;

/// Errors raised while building a report model
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Failed to read an input file
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a well-formed summary document
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read a configuration file
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid TOML for [`crate::config::ReportConfig`]
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A required top-level section is absent
    #[error("Missing required section '{0}'")]
    MissingSection(&'static str),

    /// An outcome ordinal lies outside `[1, 8]`
    #[error(
        "Malformed result {value} for rule #{rule_index} ('{rule_id}') on target '{target}': \
         expected an outcome between 1 and 8"
    )]
    MalformedResult {
        rule_index: usize,
        rule_id: String,
        target: String,
        value: serde_json::Value,
    },

    /// A target's result vector does not cover every rule exactly once
    #[error("Target '{target}' has {actual} rule results but the benchmark has {expected} rules")]
    ResultLengthMismatch {
        target: String,
        expected: usize,
        actual: usize,
    },

    /// Two targets share a friendly name
    #[error("Duplicate target name '{name}' at positions {first} and {second}")]
    DuplicateTargetName {
        name: String,
        first: usize,
        second: usize,
    },
}

/// Result alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
