//! Rule-centric aggregation
//!
//! For each rule, partitions targets by the outcome they produced and
//! classifies the rule. A single failing target makes the rule `FAIL` no
//! matter how many targets passed.

use crate::model::ReportModel;
use crate::outcome::{CategoryTotals, RollupCategory};

/// Fill `targets_by_result` and `category` on every rule and set
/// `rule_result_totals`.
///
/// If a rule's counters disagree with the observed partition (the producer
/// declared inconsistent totals), the observed counts replace them so that
/// every rule's totals sum to the number of targets.
pub fn aggregate_rules(model: &mut ReportModel) -> CategoryTotals {
    let ReportModel {
        rules,
        targets,
        rule_result_totals,
        ..
    } = model;

    for rule in rules.iter_mut() {
        rule.targets_by_result.clear();
    }

    for target in targets.iter() {
        for (rule, outcome) in rules.iter_mut().zip(&target.rule_results) {
            rule.targets_by_result
                .push(*outcome, target.friendly_name.clone());
        }
    }

    let mut totals = CategoryTotals::new();
    for (index, rule) in rules.iter_mut().enumerate() {
        let observed = rule.targets_by_result.counts();
        if observed != rule.result_totals {
            log::warn!(
                "Rule #{} ('{}') declares totals {:?} but targets report {:?}; using observed counts",
                index,
                rule.id,
                rule.result_totals.as_array(),
                observed.as_array()
            );
            rule.result_totals = observed;
        }

        let category = RollupCategory::classify(&rule.result_totals);
        rule.category = Some(category);
        totals.increment(category);
    }

    log::debug!(
        "Rule rollup: pass={} fail={} unknown={} not_applicable={}",
        totals[RollupCategory::Pass],
        totals[RollupCategory::Fail],
        totals[RollupCategory::Unknown],
        totals[RollupCategory::NotApplicable]
    );

    *rule_result_totals = totals;
    totals
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
    use crate::config::ReportConfig;
    use crate::document::ReportDocument;
    use crate::outcome::Outcome;

    fn model(json: &str) -> ReportModel {
        let doc = ReportDocument::from_json_str(json).unwrap();
        ReportModel::from_document(doc, &ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_all_pass_rolls_up_pass() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [{"id": "r1", "title": "R1", "result_totals": [2,0,0,0,0,0,0,0]}],
                "targets": [
                    {"friendly_name": "target1", "rule_results": [1]},
                    {"friendly_name": "target2", "rule_results": [1]}
                ]
            }"#,
        );

        let totals = aggregate_rules(&mut model);

        assert_eq!(model.rules[0].category, Some(RollupCategory::Pass));
        assert_eq!(totals.as_array(), &[1, 0, 0, 0]);
        assert_eq!(model.rule_result_totals, totals);
        assert_eq!(
            model.rules[0].targets_by_result.get(Outcome::Pass),
            &["target1".to_string(), "target2".to_string()]
        );
    }

    #[test]
    fn test_single_failure_dominates() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [{"id": "r1", "title": "R1", "result_totals": [2,1,0,0,0,0,0,0]}],
                "targets": [
                    {"friendly_name": "target1", "rule_results": [1]},
                    {"friendly_name": "target2", "rule_results": [2]},
                    {"friendly_name": "target3", "rule_results": [1]}
                ]
            }"#,
        );

        aggregate_rules(&mut model);

        let rule = &model.rules[0];
        assert_eq!(rule.category, Some(RollupCategory::Fail));
        assert_eq!(rule.targets_by_result.get(Outcome::Fail), &["target2".to_string()]);
        assert_eq!(
            rule.targets_by_result.get(Outcome::Pass),
            &["target1".to_string(), "target3".to_string()]
        );
        assert_eq!(model.rule_result_totals.as_array(), &[0, 1, 0, 0]);
    }

    #[test]
    fn test_errored_target_makes_rule_unknown() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [
                    {"id": "r1", "title": "R1", "result_totals": [1,0,0,0,0,0,0,0]},
                    {"id": "r2", "title": "R2", "result_totals": [0,0,0,0,0,1,0,0]}
                ],
                "targets": [
                    {"friendly_name": "ok", "rule_results": [1, 6]},
                    {"friendly_name": "unreachable"}
                ]
            }"#,
        );

        aggregate_rules(&mut model);

        assert_eq!(model.rules[0].category, Some(RollupCategory::Unknown));
        assert_eq!(model.rules[1].category, Some(RollupCategory::Unknown));
        assert_eq!(
            model.rules[0].targets_by_result.get(Outcome::Error),
            &["unreachable".to_string()]
        );
        assert_eq!(model.rule_result_totals.as_array(), &[0, 0, 2, 0]);
    }

    #[test]
    fn test_zero_targets_is_not_applicable() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [{"id": "r1", "title": "R1"}],
                "targets": []
            }"#,
        );

        aggregate_rules(&mut model);

        assert_eq!(model.rules[0].category, Some(RollupCategory::NotApplicable));
        assert!(model.rules[0].result_totals.is_empty());
        assert_eq!(model.rule_result_totals.as_array(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_inconsistent_declared_totals_are_replaced() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [{"id": "r1", "title": "R1", "result_totals": [5,0,0,0,0,0,0,0]}],
                "targets": [{"friendly_name": "t", "rule_results": [2]}]
            }"#,
        );

        aggregate_rules(&mut model);

        assert_eq!(model.rules[0].result_totals.as_array(), &[0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(model.rules[0].category, Some(RollupCategory::Fail));
    }

    #[test]
    fn test_rerun_is_stable() {
        let mut model = model(
            r#"{
                "benchmark": {},
                "rules": [{"id": "r1", "title": "R1", "result_totals": [1,1,0,0,0,0,0,0]}],
                "targets": [
                    {"friendly_name": "a", "rule_results": [1]},
                    {"friendly_name": "b", "rule_results": [2]}
                ]
            }"#,
        );

        let first = aggregate_rules(&mut model);
        let snapshot = model.rules.clone();
        let second = aggregate_rules(&mut model);

        assert_eq!(first, second);
        assert_eq!(model.rules, snapshot);
    }
}
