//! Summary builder
//!
//! Builds minimal summary output with rollup counts.

use report_kit::{CategoryTotals, RollupCategory};

use super::{ReportEntry, TOOL_NAME};

/// Build a unified summary JSON from all reports
pub fn build_summary(entries: &[ReportEntry]) -> serde_json::Value {
    let mut rule_totals = CategoryTotals::new();
    let mut target_totals = CategoryTotals::new();
    let mut reports = Vec::new();

    for entry in entries {
        for category in RollupCategory::ALL {
            rule_totals[category] += entry.model.rule_result_totals[category];
            target_totals[category] += entry.model.target_result_totals[category];
        }

        reports.push(build_report_summary(entry));
    }

    serde_json::json!({
        "tool": {
            "name": TOOL_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "summary": {
            "total_reports": entries.len(),
            "rules": totals_json(&rule_totals),
            "targets": totals_json(&target_totals)
        },
        "reports": reports
    })
}

/// Build summary for a single report
fn build_report_summary(entry: &ReportEntry) -> serde_json::Value {
    let model = &entry.model;
    serde_json::json!({
        "source": entry.source.display().to_string(),
        "benchmark": model.benchmark.benchmark_title,
        "benchmark_id": model.benchmark.xccdf_id,
        "profile": model.benchmark.profile_name,
        "rule_count": model.rules.len(),
        "target_count": model.targets.len(),
        "evaluation_failures": model.evaluation_failures().count(),
        "rules": totals_json(&model.rule_result_totals),
        "targets": totals_json(&model.target_result_totals)
    })
}

fn totals_json(totals: &CategoryTotals) -> serde_json::Value {
    serde_json::json!({
        "pass": totals[RollupCategory::Pass],
        "fail": totals[RollupCategory::Fail],
        "unknown": totals[RollupCategory::Unknown],
        "not_applicable": totals[RollupCategory::NotApplicable]
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_entry;

    #[test]
    fn test_summary_sums_across_reports() {
        let entries = vec![sample_entry(), sample_entry()];
        let summary = build_summary(&entries);

        assert_eq!(summary["summary"]["total_reports"], 2);
        assert_eq!(summary["summary"]["rules"]["fail"], 2);
        assert_eq!(summary["summary"]["rules"]["pass"], 2);
        assert_eq!(summary["summary"]["targets"]["pass"], 2);
        assert_eq!(summary["summary"]["targets"]["fail"], 2);

        let report = &summary["reports"][0];
        assert_eq!(report["benchmark"], "Demo");
        assert_eq!(report["rule_count"], 2);
        assert_eq!(report["evaluation_failures"], 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = build_summary(&[]);
        assert_eq!(summary["summary"]["total_reports"], 0);
        assert_eq!(summary["reports"], serde_json::json!([]));
    }
}
