//! Full output builder
//!
//! Builds the complete results file: one envelope holding every aggregated
//! report, with each rule's references resolved to display text and links.

use chrono::{DateTime, Utc};
use report_kit::{ReferenceDisplay, ReferenceLinker, ReportModel};
use serde::Serialize;
use uuid::Uuid;

use super::{content_hash, OutputError, ReportEntry, TOOL_NAME};

/// Envelope metadata
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool: ToolInfo,
    pub report_count: usize,
    /// Hash over the serialized `reports` array
    pub content_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// One aggregated report in the results file
#[derive(Debug, Clone, Serialize)]
pub struct FullReport<'a> {
    pub source: String,
    #[serde(flatten)]
    pub model: &'a ReportModel,
    /// `reference_links[rule]` parallels `rules[rule].references`
    pub reference_links: Vec<Vec<ReferenceDisplay>>,
}

/// The complete results file
#[derive(Debug, Clone, Serialize)]
pub struct FullOutput<'a> {
    pub envelope: Envelope,
    pub reports: Vec<FullReport<'a>>,
}

/// Build a unified output containing all reports in a single envelope
pub fn build_full_output<'a>(
    entries: &'a [ReportEntry],
    linker: &ReferenceLinker,
) -> Result<FullOutput<'a>, OutputError> {
    if entries.is_empty() {
        return Err(OutputError::Build(
            "At least one report is required".to_string(),
        ));
    }

    let reports: Vec<FullReport<'a>> = entries
        .iter()
        .map(|entry| FullReport {
            source: entry.source.display().to_string(),
            model: &entry.model,
            reference_links: entry
                .model
                .rules
                .iter()
                .map(|rule| rule.references.iter().map(|r| linker.display(r)).collect())
                .collect(),
        })
        .collect();

    let bytes = serde_json::to_vec(&reports)?;

    Ok(FullOutput {
        envelope: Envelope {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            tool: ToolInfo {
                name: TOOL_NAME,
                version: env!("CARGO_PKG_VERSION"),
            },
            report_count: reports.len(),
            content_hash: content_hash(&bytes),
        },
        reports,
    })
}

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_entry;

    #[test]
    fn test_empty_entries_rejected() {
        let err = build_full_output(&[], &ReferenceLinker::new()).unwrap_err();
        assert!(matches!(err, OutputError::Build(_)));
    }

    #[test]
    fn test_full_output_shape() {
        let entries = vec![sample_entry()];
        let output = build_full_output(&entries, &ReferenceLinker::new()).unwrap();
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["envelope"]["report_count"], 1);
        assert_eq!(value["envelope"]["tool"]["name"], TOOL_NAME);

        let report = &value["reports"][0];
        assert_eq!(report["source"], "summary.json");
        assert_eq!(report["rule_result_totals"], serde_json::json!([1, 1, 0, 0]));
        assert_eq!(report["target_result_totals"], serde_json::json!([1, 1, 0, 0]));
        assert_eq!(report["rules"][0]["targets_by_result"][1], serde_json::json!(["db-01"]));
        assert_eq!(report["targets"][1]["rules_by_result"][1], serde_json::json!([0]));
        assert_eq!(report["rules"][0]["category"], "FAIL");

        let links = &report["reference_links"][0];
        assert_eq!(
            links[0]["url"],
            "http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-2099-0001"
        );
        assert!(links[1].get("url").is_none());
        assert_eq!(links[1]["text"], "V-1");
    }

    #[test]
    fn test_content_hash_matches_reports() {
        let entries = vec![sample_entry()];
        let output = build_full_output(&entries, &ReferenceLinker::new()).unwrap();

        let bytes = serde_json::to_vec(&output.reports).unwrap();
        assert_eq!(output.envelope.content_hash, content_hash(&bytes));

        // independent of envelope id and timestamp
        let again = build_full_output(&entries, &ReferenceLinker::new()).unwrap();
        assert_eq!(output.envelope.content_hash, again.envelope.content_hash);
        assert_ne!(output.envelope.report_id, again.envelope.report_id);
    }
}
