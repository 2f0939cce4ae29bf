//! Report view model
//!
//! [`ReportModel`] is built once from a [`ReportDocument`], filled in by the
//! aggregation passes, then handed read-only to whatever renders it.
//!
//! ```text
//! ReportDocument ──► ReportModel::from_document()   normalize + index
//!                         │
//!                         ├── aggregate_rules()     targets_by_result, rule_result_totals
//!                         └── aggregate_targets()   rules_by_result, target_result_totals
//! ```

use serde::Serialize;

use crate::config::ReportConfig;
use crate::cross_index::TargetIndex;
use crate::document::{Benchmark, Reference, ReportDocument, RuleRecord, TargetRecord};
use crate::error::ReportResult;
use crate::normalizer::{normalize, NormalizedResults};
use crate::outcome::{CategoryTotals, Outcome, OutcomeBuckets, OutcomeCounts, RollupCategory};

/// A rule with its per-outcome target partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub references: Vec<Reference>,

    /// Targets per outcome, counted
    pub result_totals: OutcomeCounts,

    /// Target names per outcome, in target order
    pub targets_by_result: OutcomeBuckets<String>,

    /// Rollup category, set by the rule-centric pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RollupCategory>,
}

impl Rule {
    fn from_record(record: RuleRecord, deltas: Option<&OutcomeCounts>, target_count: usize) -> Self {
        let mut result_totals = declared_totals(&record, target_count);
        if let Some(delta) = deltas {
            result_totals.add(delta);
        }

        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            references: record.references,
            result_totals,
            targets_by_result: OutcomeBuckets::new(),
            category: None,
        }
    }

    /// Per-row counts in rollup-group order (pass, fail, unknown, not applicable)
    pub fn display_counts(&self) -> CategoryTotals {
        self.result_totals.by_category()
    }

    /// Anchor name for the rule at `index`
    pub fn anchor(index: usize) -> String {
        format!("rule-{}", index)
    }
}

/// A target with its per-outcome rule partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub friendly_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,

    /// One outcome per rule, in rule order
    pub rule_results: Vec<Outcome>,

    /// Rule positions per outcome, in rule order
    pub rules_by_result: OutcomeBuckets<usize>,

    /// Results were synthesized because the target could not be evaluated
    pub evaluation_failed: bool,

    /// Rollup category, set by the target-centric pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RollupCategory>,
}

impl Target {
    fn from_record(record: TargetRecord, rule_results: Vec<Outcome>, evaluation_failed: bool) -> Self {
        Self {
            friendly_name: record.friendly_name,
            status_detail: record.status_detail,
            error_trace: record.error_trace,
            rule_results,
            rules_by_result: OutcomeBuckets::new(),
            evaluation_failed,
            category: None,
        }
    }

    pub fn display_counts(&self) -> CategoryTotals {
        self.rules_by_result.counts().by_category()
    }

    pub fn has_diagnostics(&self) -> bool {
        self.status_detail.is_some() || self.error_trace.is_some()
    }

    /// Anchor name for the target at `index`
    pub fn anchor(index: usize) -> String {
        format!("target-{}", index)
    }
}

/// Link from a rule's detail view to a target row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRef<'a> {
    pub name: &'a str,
    /// `None` only if the name is not in the index
    pub index: Option<usize>,
}

impl TargetRef<'_> {
    pub fn anchor(&self) -> Option<String> {
        self.index.map(Target::anchor)
    }
}

/// Link from a target's detail view to a rule row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleRef<'a> {
    pub index: usize,
    pub title: &'a str,
}

impl RuleRef<'_> {
    pub fn anchor(&self) -> String {
        Rule::anchor(self.index)
    }
}

/// Root of the categorized report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub benchmark: Benchmark,
    pub rules: Vec<Rule>,
    pub targets: Vec<Target>,

    /// Rules per rollup category
    pub rule_result_totals: CategoryTotals,

    /// Targets per rollup category
    pub target_result_totals: CategoryTotals,

    #[serde(skip)]
    target_index: TargetIndex,
}

impl ReportModel {
    /// Validate and normalize a parsed document.
    ///
    /// Fails fast on missing sections, malformed or ragged result vectors,
    /// and (under the default policy) duplicate target names. Derived fields
    /// stay empty until the aggregation passes run.
    pub fn from_document(document: ReportDocument, config: &ReportConfig) -> ReportResult<Self> {
        let (benchmark, rule_records, target_records) = document.into_sections()?;

        let NormalizedResults {
            results,
            deltas,
            evaluation_failed,
        } = normalize(&rule_records, &target_records)?;

        let target_index = TargetIndex::build(
            target_records.iter().map(|t| t.friendly_name.as_str()),
            config.duplicate_target_names,
        )?;

        let target_count = target_records.len();
        let rules = rule_records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Rule::from_record(record, deltas.get(index), target_count))
            .collect();

        let targets = target_records
            .into_iter()
            .zip(results)
            .enumerate()
            .map(|(index, (record, rule_results))| {
                Target::from_record(record, rule_results, evaluation_failed.contains(&index))
            })
            .collect();

        Ok(Self {
            benchmark,
            rules,
            targets,
            rule_result_totals: CategoryTotals::new(),
            target_result_totals: CategoryTotals::new(),
            target_index,
        })
    }

    pub fn target_index(&self) -> &TargetIndex {
        &self.target_index
    }

    /// Targets that produced `outcome` for the rule at `rule_index`
    pub fn targets_for(&self, rule_index: usize, outcome: Outcome) -> Vec<TargetRef<'_>> {
        self.rules
            .get(rule_index)
            .map(|rule| {
                rule.targets_by_result
                    .get(outcome)
                    .iter()
                    .map(|name| TargetRef {
                        name: name.as_str(),
                        index: self.target_index.position(name),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rules for which the target at `target_index` recorded `outcome`
    pub fn rules_for(&self, target_index: usize, outcome: Outcome) -> Vec<RuleRef<'_>> {
        self.targets
            .get(target_index)
            .map(|target| {
                target
                    .rules_by_result
                    .get(outcome)
                    .iter()
                    .filter_map(|&index| {
                        self.rules.get(index).map(|rule| RuleRef {
                            index,
                            title: &rule.title,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Targets whose results were synthesized as errors
    pub fn evaluation_failures(&self) -> impl Iterator<Item = (usize, &Target)> {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.evaluation_failed)
    }

    /// Rules whose rollup is `category`
    pub fn rules_in(&self, category: RollupCategory) -> impl Iterator<Item = (usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.category == Some(category))
    }

    /// Targets whose rollup is `category`
    pub fn targets_in(&self, category: RollupCategory) -> impl Iterator<Item = (usize, &Target)> {
        self.targets
            .iter()
            .enumerate()
            .filter(move |(_, target)| target.category == Some(category))
    }
}

/// Counters declared by the producer, padded to eight entries.
///
/// No counter can exceed the number of targets; larger values are clamped.
/// The rule-centric pass replaces any remaining mismatch with observed counts.
fn declared_totals(record: &RuleRecord, target_count: usize) -> OutcomeCounts {
    if record.result_totals.len() > Outcome::COUNT {
        log::warn!(
            "Rule '{}' declares {} result totals; ignoring entries past {}",
            record.id,
            record.result_totals.len(),
            Outcome::COUNT
        );
    }

    let mut counts = OutcomeCounts::new();
    for (outcome, &value) in Outcome::ALL.into_iter().zip(&record.result_totals) {
        let declared = usize::try_from(value).unwrap_or(usize::MAX);
        if declared > target_count {
            log::warn!(
                "Rule '{}' declares {} {} results for {} targets; clamping",
                record.id,
                value,
                outcome,
                target_count
            );
        }
        counts[outcome] = declared.min(target_count);
    }
    counts
}

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
