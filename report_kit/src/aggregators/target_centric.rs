//! Target-centric aggregation
//!
//! Mirror of the rule-centric pass: for each target, partitions rule
//! positions by the outcome recorded for them and classifies the target with
//! the same rollup policy.

use crate::model::ReportModel;
use crate::outcome::{CategoryTotals, RollupCategory};

/// Fill `rules_by_result` and `category` on every target and set
/// `target_result_totals`.
pub fn aggregate_targets(model: &mut ReportModel) -> CategoryTotals {
    let mut totals = CategoryTotals::new();

    for target in model.targets.iter_mut() {
        target.rules_by_result.clear();
        for (rule_index, outcome) in target.rule_results.iter().enumerate() {
            target.rules_by_result.push(*outcome, rule_index);
        }

        let category = RollupCategory::classify(&target.rules_by_result.counts());
        target.category = Some(category);
        totals.increment(category);
    }

    log::debug!(
        "Target rollup: pass={} fail={} unknown={} not_applicable={}",
        totals[RollupCategory::Pass],
        totals[RollupCategory::Fail],
        totals[RollupCategory::Unknown],
        totals[RollupCategory::NotApplicable]
    );

    model.target_result_totals = totals;
    totals
}
