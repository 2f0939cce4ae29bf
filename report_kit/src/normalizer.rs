//! Result normalization
//!
//! Every target must carry one outcome per rule before aggregation can run.
//! A target whose `rule_results` is missing could not be evaluated (for
//! example the scanner failed to connect), so it is filled with `ERROR` for
//! every rule.
//!
//! Filling in outcomes changes what each rule's counters should say. Rather
//! than patching rule counters in place, [`normalize`] returns the per-rule
//! deltas alongside the filled results; the caller applies them with
//! [`NormalizedResults::apply_deltas`]. Both halves can be checked on their own.

use crate::document::{RuleRecord, TargetRecord};
use crate::error::{ReportError, ReportResult};
use crate::outcome::{Outcome, OutcomeCounts};

/// Outcome assigned to every rule of a target that has no results
pub const EVALUATION_FAILED_OUTCOME: Outcome = Outcome::Error;

/// Output of the normalization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResults {
    /// Decoded outcomes, `results[target][rule]`
    pub results: Vec<Vec<Outcome>>,

    /// Counter adjustments per rule caused by synthesized outcomes
    pub deltas: Vec<OutcomeCounts>,

    /// Positions of targets whose results were synthesized
    pub evaluation_failed: Vec<usize>,
}

impl NormalizedResults {
    /// Add the synthesized-outcome deltas onto per-rule counters.
    ///
    /// `totals` must hold one entry per rule, in rule order.
    pub fn apply_deltas(&self, totals: &mut [OutcomeCounts]) {
        for (counts, delta) in totals.iter_mut().zip(&self.deltas) {
            counts.add(delta);
        }
    }

    pub fn is_evaluation_failed(&self, target_index: usize) -> bool {
        self.evaluation_failed.contains(&target_index)
    }
}

/// Decode and complete every target's result vector.
///
/// Fails when a present result vector has the wrong length or holds an
/// ordinal outside `[1, 8]`. Never alters the input records.
pub fn normalize(
    rules: &[RuleRecord],
    targets: &[TargetRecord],
) -> ReportResult<NormalizedResults> {
    let rule_count = rules.len();
    let mut results = Vec::with_capacity(targets.len());
    let mut deltas = vec![OutcomeCounts::new(); rule_count];
    let mut evaluation_failed = Vec::new();

    for (target_index, target) in targets.iter().enumerate() {
        match &target.rule_results {
            Some(ordinals) => {
                results.push(decode_results(rules, target, ordinals)?);
            }
            None => {
                log::warn!(
                    "Target '{}' has no rule results; recording {} for all {} rules{}",
                    target.friendly_name,
                    EVALUATION_FAILED_OUTCOME,
                    rule_count,
                    target
                        .status_detail
                        .as_deref()
                        .map(|detail| format!(" ({})", detail))
                        .unwrap_or_default()
                );
                for delta in deltas.iter_mut() {
                    delta.increment(EVALUATION_FAILED_OUTCOME);
                }
                results.push(vec![EVALUATION_FAILED_OUTCOME; rule_count]);
                evaluation_failed.push(target_index);
            }
        }
    }

    Ok(NormalizedResults {
        results,
        deltas,
        evaluation_failed,
    })
}

fn decode_results(
    rules: &[RuleRecord],
    target: &TargetRecord,
    ordinals: &[serde_json::Value],
) -> ReportResult<Vec<Outcome>> {
    if ordinals.len() != rules.len() {
        return Err(ReportError::ResultLengthMismatch {
            target: target.friendly_name.clone(),
            expected: rules.len(),
            actual: ordinals.len(),
        });
    }

    ordinals
        .iter()
        .zip(rules)
        .enumerate()
        .map(|(rule_index, (value, rule))| {
            value
                .as_u64()
                .and_then(Outcome::from_ordinal)
                .ok_or_else(|| ReportError::MalformedResult {
                    rule_index,
                    rule_id: rule.id.clone(),
                    target: target.friendly_name.clone(),
                    value: value.clone(),
                })
        })
        .collect()
}

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
