//! Scan summary document types
//!
//! Serde mirror of the summary JSON produced by a scanner run. The three
//! top-level sections are optional at the serde layer so that their absence
//! surfaces as [`ReportError::MissingSection`] instead of a generic parse
//! error.
//!
//! ```json
//! {
//!   "benchmark": { "benchmark_title": "...", "xccdf_version": "1.2", ... },
//!   "rules":   [ { "id": "...", "title": "...", "result_totals": [..8..], ... } ],
//!   "targets": [ { "friendly_name": "...", "rule_results": [1, 2, ...] } ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReportError, ReportResult};

/// Root of a scan summary document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(default)]
    pub benchmark: Option<Benchmark>,
    #[serde(default)]
    pub rules: Option<Vec<RuleRecord>>,
    #[serde(default)]
    pub targets: Option<Vec<TargetRecord>>,
}

impl ReportDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Split into the three required sections.
    ///
    /// Fails fast with `MissingSection` if any of them is absent or null.
    pub fn into_sections(self) -> ReportResult<(Benchmark, Vec<RuleRecord>, Vec<TargetRecord>)> {
        let benchmark = self
            .benchmark
            .ok_or(ReportError::MissingSection("benchmark"))?;
        let rules = self.rules.ok_or(ReportError::MissingSection("rules"))?;
        let targets = self.targets.ok_or(ReportError::MissingSection("targets"))?;
        Ok((benchmark, rules, targets))
    }
}

/// Benchmark metadata, passed through to the report unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    #[serde(default, alias = "title")]
    pub benchmark_title: String,

    /// Either a string or a number depending on the producer
    #[serde(default, alias = "version", skip_serializing_if = "Option::is_none")]
    pub xccdf_version: Option<serde_json::Value>,

    #[serde(default, alias = "id")]
    pub xccdf_id: String,

    #[serde(default, alias = "profile")]
    pub profile_name: String,

    /// Any other producer fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Benchmark {
    /// Version text for display.
    ///
    /// Hidden when absent, empty, or a number that is not positive.
    pub fn display_version(&self) -> Option<String> {
        match self.xccdf_version.as_ref()? {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) if v > 0.0 => Some(n.to_string()),
                _ => None,
            },
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(v) if v <= 0.0 => None,
                    _ if trimmed.is_empty() => None,
                    _ => Some(trimmed.to_string()),
                }
            }
            _ => None,
        }
    }
}

/// External citation attached to a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference-system identifier, usually a URI such as `http://cve.mitre.org`
    #[serde(default)]
    pub system: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
}

impl Reference {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            value: value.into(),
        }
    }
}

/// Rule as it appears in the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<Reference>,
    /// Per-outcome target counts as declared by the producer
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_totals: Vec<u64>,
}

/// Target as it appears in the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,
    /// One-based outcome ordinals, one per rule. Absent when the target
    /// could not be evaluated. Kept as raw JSON so that negative or
    /// fractional entries are reported against their rule and target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_results: Option<Vec<serde_json::Value>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}
