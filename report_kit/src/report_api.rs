//! # Report API
//!
//! High-level entry points for turning a scan summary document into an
//! aggregated [`ReportModel`].
//!
//! ## Example
//!
//! ```ignore
//! use report_kit::report_api::{build_report_from_file, format_summary};
//! use report_kit::ReportConfig;
//!
//! let model = build_report_from_file("summary.json", &ReportConfig::default())?;
//! println!("{}", format_summary(&model));
//!
//! for (index, rule) in model.rules.iter().enumerate() {
//!     for target in model.targets_for(index, Outcome::Fail) {
//!         println!("{} failed on {}", rule.title, target.name);
//!     }
//! }
//! ```
//!
//! Building is a single synchronous pass with no I/O past reading the input:
//!
//! ```text
//! parse ─► validate sections ─► normalize ─► index names ─► by rule ─► by target
//! ```

use std::path::Path;

use crate::aggregators::{aggregate, aggregate_rules, aggregate_targets};
use crate::config::ReportConfig;
use crate::document::ReportDocument;
use crate::error::{ReportError, ReportResult};
use crate::model::ReportModel;
use crate::outcome::{CategoryTotals, Outcome, RollupCategory};

// ============================================================================
// Public API Functions
// ============================================================================

/// Build an aggregated report from a parsed document.
///
/// # Errors
/// * `MissingSection` - `benchmark`, `rules` or `targets` is absent
/// * `MalformedResult` / `ResultLengthMismatch` - a target's results are unusable
/// * `DuplicateTargetName` - two targets share a name and the policy is `reject`
pub fn build_report(document: ReportDocument, config: &ReportConfig) -> ReportResult<ReportModel> {
    let mut model = ReportModel::from_document(document, config)?;
    aggregate(&mut model);
    Ok(model)
}

/// Parse JSON text and build an aggregated report
pub fn build_report_from_str(text: &str, config: &ReportConfig) -> ReportResult<ReportModel> {
    let document = ReportDocument::from_json_str(text)?;
    build_report(document, config)
}

/// Read a summary file and build an aggregated report
pub fn build_report_from_file<P: AsRef<Path>>(
    path: P,
    config: &ReportConfig,
) -> ReportResult<ReportModel> {
    let text = read_input(path.as_ref())?;
    build_report_from_str(&text, config)
}

/// Read a summary file and build an aggregated report, logging each phase.
///
/// Same result as [`build_report_from_file`].
pub fn build_report_with_logging<P: AsRef<Path>>(
    path: P,
    config: &ReportConfig,
) -> ReportResult<ReportModel> {
    let path = path.as_ref();
    log::info!("Reading scan summary: path={}", path.display());

    let text = read_input(path).map_err(|e| {
        log::error!("Failed to read scan summary: error={}", e);
        e
    })?;

    let document = ReportDocument::from_json_str(&text).map_err(|e| {
        log::error!("Scan summary is not valid JSON: error={}", e);
        e
    })?;

    // Phase 1: Validate and normalize
    log::info!("Phase 1: Normalizing target results");
    let mut model = ReportModel::from_document(document, config).map_err(|e| {
        log::error!("Normalization failed: error={}", e);
        e
    })?;

    log::info!(
        "Normalization complete: rules={} targets={} evaluation_failures={}",
        model.rules.len(),
        model.targets.len(),
        model.evaluation_failures().count()
    );

    // Phase 2: Rule-centric pass
    log::info!("Phase 2: Aggregating by rule");
    let rule_totals = aggregate_rules(&mut model);
    log::info!("Rule rollup complete: {}", describe_totals(&rule_totals));

    // Phase 3: Target-centric pass
    log::info!("Phase 3: Aggregating by target");
    let target_totals = aggregate_targets(&mut model);
    log::info!("Target rollup complete: {}", describe_totals(&target_totals));

    Ok(model)
}

fn read_input(path: &Path) -> ReportResult<String> {
    std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Helper Functions for Result Handling
// ============================================================================

/// `pass=1 fail=0 unknown=0 not_applicable=0`
fn describe_totals(totals: &CategoryTotals) -> String {
    format!(
        "pass={} fail={} unknown={} not_applicable={}",
        totals[RollupCategory::Pass],
        totals[RollupCategory::Fail],
        totals[RollupCategory::Unknown],
        totals[RollupCategory::NotApplicable]
    )
}

fn format_distribution(totals: &CategoryTotals) -> String {
    RollupCategory::ALL
        .iter()
        .map(|category| format!("{} {}", totals[*category], category.label().to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of an aggregated report
pub fn format_summary(model: &ReportModel) -> String {
    format!(
        "Rules: {} ({}) | Targets: {} ({})",
        model.rules.len(),
        format_distribution(&model.rule_result_totals),
        model.targets.len(),
        format_distribution(&model.target_result_totals)
    )
}

/// Plain-text report listing every rule and target with non-passing results
pub fn format_report(model: &ReportModel) -> String {
    let mut report = String::new();

    report.push_str("=== Benchmark ===\n");
    report.push_str(&format!(
        "Benchmark: {}{}\n",
        model.benchmark.benchmark_title,
        model
            .benchmark
            .display_version()
            .map(|v| format!(" {}", v))
            .unwrap_or_default()
    ));
    report.push_str(&format!("Profile: {}\n", model.benchmark.profile_name));
    report.push_str(&format!("{}\n", format_summary(model)));

    let attention = [Outcome::Fail, Outcome::Error, Outcome::Unknown, Outcome::NotChecked];

    report.push_str("\n=== Results by Rule ===\n");
    for (index, rule) in model.rules.iter().enumerate() {
        let category = rule.category.unwrap_or(RollupCategory::NotApplicable);
        report.push_str(&format!("[{}] {}: {}\n", category, rule.id, rule.title));
        for outcome in attention {
            let targets = model.targets_for(index, outcome);
            if targets.is_empty() {
                continue;
            }
            let names: Vec<&str> = targets.iter().map(|t| t.name).collect();
            report.push_str(&format!("    {}: {}\n", outcome, names.join(", ")));
        }
    }

    report.push_str("\n=== Results by Target ===\n");
    for (index, target) in model.targets.iter().enumerate() {
        let category = target.category.unwrap_or(RollupCategory::NotApplicable);
        report.push_str(&format!("[{}] {}\n", category, target.friendly_name));
        if let Some(detail) = &target.status_detail {
            report.push_str(&format!("    Status: {}\n", detail));
        }
        for outcome in attention {
            let rules = model.rules_for(index, outcome);
            if rules.is_empty() {
                continue;
            }
            let titles: Vec<&str> = rules.iter().map(|r| r.title).collect();
            report.push_str(&format!("    {}: {}\n", outcome, titles.join(", ")));
        }
    }

    report
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

    const SAMPLE: &str = r#"{
        "benchmark": {
            "benchmark_title": "Demo Benchmark",
            "xccdf_version": "1.2",
            "xccdf_id": "xccdf_org.example_benchmark_demo",
            "profile_name": "Baseline"
        },
        "rules": [
            {"id": "r1", "title": "Password length", "result_totals": [1,1,0,0,0,0,0,0]},
            {"id": "r2", "title": "Audit enabled", "result_totals": [2,0,0,0,0,0,0,0]}
        ],
        "targets": [
            {"friendly_name": "web-01", "rule_results": [1, 1]},
            {"friendly_name": "db-01", "rule_results": [2, 1]},
            {"friendly_name": "mail-01", "status_detail": "Connection timed out"}
        ]
    }"#;

    #[test]
    fn test_build_report_from_str() {
        let model = build_report_from_str(SAMPLE, &ReportConfig::default()).unwrap();

        assert_eq!(model.rule_result_totals.as_array(), &[0, 1, 1, 0]);
        assert_eq!(model.target_result_totals.as_array(), &[1, 1, 1, 0]);

        let failing = model.targets_for(0, Outcome::Fail);
        assert_eq!(failing.len(), 1);
        assert_eq!(failing[0].name, "db-01");
        assert_eq!(failing[0].index, Some(1));

        let errored = model.rules_for(2, Outcome::Error);
        let titles: Vec<&str> = errored.iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Password length", "Audit enabled"]);
    }

    #[test]
    fn test_build_report_missing_section() {
        let err = build_report_from_str(r#"{"benchmark": {}, "rules": []}"#, &ReportConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingSection("targets")));
    }

    #[test]
    fn test_build_report_from_missing_file() {
        let err = build_report_from_file("/nonexistent/summary.json", &ReportConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn test_logging_variant_matches_plain_build() {
        let dir = std::env::temp_dir().join(format!("report_kit_api_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("summary.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let plain = build_report_from_file(&path, &ReportConfig::default()).unwrap();
        let logged = build_report_with_logging(&path, &ReportConfig::default()).unwrap();
        assert_eq!(plain, logged);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_format_summary() {
        let model = build_report_from_str(SAMPLE, &ReportConfig::default()).unwrap();
        assert_eq!(
            format_summary(&model),
            "Rules: 2 (0 pass, 1 fail, 1 unknown, 0 not applicable) | \
             Targets: 3 (1 pass, 1 fail, 1 unknown, 0 not applicable)"
        );
    }

    #[test]
    fn test_format_report() {
        let model = build_report_from_str(SAMPLE, &ReportConfig::default()).unwrap();
        let report = format_report(&model);

        assert!(report.contains("Benchmark: Demo Benchmark 1.2"));
        assert!(report.contains("[Fail] r1: Password length"));
        assert!(report.contains("    FAIL: db-01"));
        assert!(report.contains("    Status: Connection timed out"));
        assert!(report.contains("    ERROR: Password length, Audit enabled"));
    }
}
