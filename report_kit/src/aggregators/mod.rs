//! # Aggregation passes
//!
//! Both passes read the normalized result matrix held by a [`ReportModel`]
//! and write derived partitions and rollup totals back into it.
//!
//! - `rule_centric` - targets per outcome for each rule, rule rollups
//! - `target_centric` - rules per outcome for each target, target rollups
//!
//! The two rollups are independent: "rules that failed
//! somewhere" and "targets with at least one failing rule" are different
//! quantities.
//!
//! Each pass clears what it derives before filling it, so re-running
//! [`aggregate`] on the same model yields the same result.

pub mod rule_centric;
pub mod target_centric;

pub use rule_centric::aggregate_rules;
pub use target_centric::aggregate_targets;

use crate::model::ReportModel;
use crate::outcome::CategoryTotals;

/// Rollup distributions produced by one aggregation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationTotals {
    pub rules: CategoryTotals,
    pub targets: CategoryTotals,
}

/// Run the rule-centric pass, then the target-centric pass
pub fn aggregate(model: &mut ReportModel) -> AggregationTotals {
    let rules = aggregate_rules(model);
    let targets = aggregate_targets(model);
    AggregationTotals { rules, targets }
}
