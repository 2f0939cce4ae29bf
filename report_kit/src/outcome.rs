//! Outcome and rollup category types
//!
//! A scan records one of eight outcomes per (rule, target) pair. The ordinal
//! position of each outcome is fixed: summary documents store outcomes as
//! 1-based ordinals, and every per-outcome array in this crate is indexed by
//! [`Outcome::index`].
//!
//! For summaries, outcomes collapse into four rollup categories:
//!
//! ```text
//! PASS            = { PASS }
//! FAIL            = { FAIL }
//! UNKNOWN         = { ERROR, UNKNOWN, NOT_CHECKED }
//! NOT_APPLICABLE  = { NOT_APPLICABLE, NOT_SELECTED, INFORMATIONAL }
//! ```

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Result of evaluating one rule against one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
    Unknown,
    NotChecked,
    NotApplicable,
    NotSelected,
    Informational,
}

impl Outcome {
    /// Number of outcome variants
    pub const COUNT: usize = 8;

    /// All outcomes in ordinal order
    pub const ALL: [Outcome; Outcome::COUNT] = [
        Outcome::Pass,
        Outcome::Fail,
        Outcome::Error,
        Outcome::Unknown,
        Outcome::NotChecked,
        Outcome::NotApplicable,
        Outcome::NotSelected,
        Outcome::Informational,
    ];

    /// Zero-based storage index
    pub fn index(self) -> usize {
        match self {
            Outcome::Pass => 0,
            Outcome::Fail => 1,
            Outcome::Error => 2,
            Outcome::Unknown => 3,
            Outcome::NotChecked => 4,
            Outcome::NotApplicable => 5,
            Outcome::NotSelected => 6,
            Outcome::Informational => 7,
        }
    }

    /// One-based ordinal as written in summary documents
    pub fn ordinal(self) -> u8 {
        match self {
            Outcome::Pass => 1,
            Outcome::Fail => 2,
            Outcome::Error => 3,
            Outcome::Unknown => 4,
            Outcome::NotChecked => 5,
            Outcome::NotApplicable => 6,
            Outcome::NotSelected => 7,
            Outcome::Informational => 8,
        }
    }

    /// Decode a one-based document ordinal. Returns `None` outside `[1, 8]`.
    pub fn from_ordinal(ordinal: u64) -> Option<Outcome> {
        let index = usize::try_from(ordinal).ok()?.checked_sub(1)?;
        Outcome::ALL.get(index).copied()
    }

    /// Rollup category this outcome counts toward
    pub fn category(self) -> RollupCategory {
        match self {
            Outcome::Pass => RollupCategory::Pass,
            Outcome::Fail => RollupCategory::Fail,
            Outcome::Error | Outcome::Unknown | Outcome::NotChecked => RollupCategory::Unknown,
            Outcome::NotApplicable | Outcome::NotSelected | Outcome::Informational => {
                RollupCategory::NotApplicable
            }
        }
    }

    /// Human-facing label
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::Error => "ERROR",
            Outcome::Unknown => "UNKNOWN",
            Outcome::NotChecked => "NOT CHECKED",
            Outcome::NotApplicable => "NOT APPLICABLE",
            Outcome::NotSelected => "NOT SELECTED",
            Outcome::Informational => "INFORMATIONAL",
        }
    }

    /// Presentation style for result badges
    pub fn style(self) -> &'static str {
        self.category().style()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Summary category derived from a set of outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollupCategory {
    Pass,
    Fail,
    Unknown,
    NotApplicable,
}

impl RollupCategory {
    /// Number of rollup categories
    pub const COUNT: usize = 4;

    /// All categories in summary order
    pub const ALL: [RollupCategory; RollupCategory::COUNT] = [
        RollupCategory::Pass,
        RollupCategory::Fail,
        RollupCategory::Unknown,
        RollupCategory::NotApplicable,
    ];

    /// Zero-based index into summary vectors
    pub fn index(self) -> usize {
        match self {
            RollupCategory::Pass => 0,
            RollupCategory::Fail => 1,
            RollupCategory::Unknown => 2,
            RollupCategory::NotApplicable => 3,
        }
    }

    /// Outcomes grouped under this category
    pub fn members(self) -> &'static [Outcome] {
        match self {
            RollupCategory::Pass => &[Outcome::Pass],
            RollupCategory::Fail => &[Outcome::Fail],
            RollupCategory::Unknown => &[Outcome::Error, Outcome::Unknown, Outcome::NotChecked],
            RollupCategory::NotApplicable => &[
                Outcome::NotApplicable,
                Outcome::NotSelected,
                Outcome::Informational,
            ],
        }
    }

    /// Classify a set of outcome counts.
    ///
    /// First match wins:
    /// 1. any FAIL → `Fail`
    /// 2. any ERROR / UNKNOWN / NOT_CHECKED → `Unknown`
    /// 3. any PASS → `Pass`
    /// 4. otherwise → `NotApplicable`
    ///
    /// An empty count set and a set holding only not-applicable outcomes both
    /// land in `NotApplicable`. Use [`OutcomeCounts::is_empty`] to tell them apart.
    pub fn classify(counts: &OutcomeCounts) -> RollupCategory {
        if counts[Outcome::Fail] > 0 {
            RollupCategory::Fail
        } else if counts.category_count(RollupCategory::Unknown) > 0 {
            RollupCategory::Unknown
        } else if counts[Outcome::Pass] > 0 {
            RollupCategory::Pass
        } else {
            RollupCategory::NotApplicable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RollupCategory::Pass => "Pass",
            RollupCategory::Fail => "Fail",
            RollupCategory::Unknown => "Unknown",
            RollupCategory::NotApplicable => "Not Applicable",
        }
    }

    /// Chart legend text
    pub fn legend(self) -> &'static str {
        match self {
            RollupCategory::Pass => "Pass (no failures or errors)",
            RollupCategory::Fail => "Fail (some failures)",
            RollupCategory::Unknown => "Unknown (some unknown, no failures)",
            RollupCategory::NotApplicable => "Not Applicable",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            RollupCategory::Pass => "success",
            RollupCategory::Fail => "danger",
            RollupCategory::Unknown => "warning",
            RollupCategory::NotApplicable => "info",
        }
    }
}

impl std::fmt::Display for RollupCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Counters
// ============================================================================

/// One counter per outcome, serialized as an 8-element array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeCounts([usize; Outcome::COUNT]);

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_array(counts: [usize; Outcome::COUNT]) -> Self {
        Self(counts)
    }

    pub fn as_array(&self) -> &[usize; Outcome::COUNT] {
        &self.0
    }

    pub fn increment(&mut self, outcome: Outcome) {
        self[outcome] = self[outcome].saturating_add(1);
    }

    /// Add another counter set element-wise, saturating at `usize::MAX`
    pub fn add(&mut self, other: &OutcomeCounts) {
        for outcome in Outcome::ALL {
            self[outcome] = self[outcome].saturating_add(other[outcome]);
        }
    }

    /// Sum of all counters
    pub fn total(&self) -> usize {
        self.0.iter().fold(0, |sum, count| sum.saturating_add(*count))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Summed count of the outcomes grouped under `category`
    pub fn category_count(&self, category: RollupCategory) -> usize {
        category.members().iter().map(|outcome| self[*outcome]).sum()
    }

    /// Counts per rollup group, in category order
    pub fn by_category(&self) -> CategoryTotals {
        let mut totals = CategoryTotals::new();
        for category in RollupCategory::ALL {
            totals[category] = self.category_count(category);
        }
        totals
    }

    pub fn rollup(&self) -> RollupCategory {
        RollupCategory::classify(self)
    }
}

impl Index<Outcome> for OutcomeCounts {
    type Output = usize;

    fn index(&self, outcome: Outcome) -> &usize {
        &self.0[outcome.index()]
    }
}

impl IndexMut<Outcome> for OutcomeCounts {
    fn index_mut(&mut self, outcome: Outcome) -> &mut usize {
        &mut self.0[outcome.index()]
    }
}

/// One counter per rollup category, serialized as a 4-element array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals([usize; RollupCategory::COUNT]);

impl CategoryTotals {
    /// Slices of a full pie are never drawn smaller than 1/72 of the total
    const MIN_SLICE_DIVISOR: f64 = 72.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_array(totals: [usize; RollupCategory::COUNT]) -> Self {
        Self(totals)
    }

    pub fn as_array(&self) -> &[usize; RollupCategory::COUNT] {
        &self.0
    }

    pub fn increment(&mut self, category: RollupCategory) {
        self[category] += 1;
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Values for a pie chart.
    ///
    /// Non-zero categories at or below the minimum slice (`round(total / 72)`)
    /// are bumped by that minimum so they stay visible. Zero stays zero.
    pub fn chart_values(&self) -> [usize; RollupCategory::COUNT] {
        let min_slice = (self.total() as f64 / Self::MIN_SLICE_DIVISOR).round() as usize;
        let mut values = self.0;
        for value in values.iter_mut() {
            if *value != 0 && *value <= min_slice {
                *value += min_slice;
            }
        }
        values
    }
}

impl Index<RollupCategory> for CategoryTotals {
    type Output = usize;

    fn index(&self, category: RollupCategory) -> &usize {
        &self.0[category.index()]
    }
}

impl IndexMut<RollupCategory> for CategoryTotals {
    fn index_mut(&mut self, category: RollupCategory) -> &mut usize {
        &mut self.0[category.index()]
    }
}

/// Eight parallel sequences, one per outcome.
///
/// Used for the rule→targets and target→rules partitions. Insertion order
/// within a bucket is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeBuckets<T>([Vec<T>; Outcome::COUNT]);

impl<T> Default for OutcomeBuckets<T> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<T> OutcomeBuckets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome, item: T) {
        self.0[outcome.index()].push(item);
    }

    pub fn get(&self, outcome: Outcome) -> &[T] {
        &self.0[outcome.index()]
    }

    pub fn clear(&mut self) {
        for bucket in self.0.iter_mut() {
            bucket.clear();
        }
    }

    /// Bucket sizes as counters
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::new();
        for outcome in Outcome::ALL {
            counts[outcome] = self.get(outcome).len();
        }
        counts
    }

    /// Total items across all buckets
    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }

    /// Non-empty buckets in ordinal order
    pub fn non_empty(&self) -> impl Iterator<Item = (Outcome, &[T])> {
        Outcome::ALL
            .into_iter()
            .map(move |outcome| (outcome, self.get(outcome)))
            .filter(|(_, items)| !items.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
