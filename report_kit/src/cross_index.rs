//! Target name index
//!
//! Rule detail views link each target by name to its row in the target
//! table. [`TargetIndex`] maps a target's friendly name to its position and
//! is built once when the report model is constructed.
//!
//! The reverse direction (target → rule) needs no index: rules are always
//! addressed by position.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// What to do when two targets share a friendly name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Fail with [`ReportError::DuplicateTargetName`]
    #[default]
    Reject,
    /// The later target wins the name; earlier ones become unreachable by name
    LastWriteWins,
}

/// Friendly name → target position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetIndex {
    positions: HashMap<String, usize>,
    shadowed: Vec<usize>,
}

impl TargetIndex {
    /// Build the index from target names in order
    pub fn build<'a, I>(names: I, policy: DuplicateNamePolicy) -> ReportResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = TargetIndex::default();

        for (position, name) in names.into_iter().enumerate() {
            if let Some(previous) = index.positions.insert(name.to_string(), position) {
                match policy {
                    DuplicateNamePolicy::Reject => {
                        return Err(ReportError::DuplicateTargetName {
                            name: name.to_string(),
                            first: previous,
                            second: position,
                        });
                    }
                    DuplicateNamePolicy::LastWriteWins => {
                        log::warn!(
                            "Duplicate target name '{}': position {} replaces position {}",
                            name,
                            position,
                            previous
                        );
                        index.shadowed.push(previous);
                    }
                }
            }
        }

        Ok(index)
    }

    /// Position of the target carrying `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions that lost their name to a later duplicate
    pub fn shadowed(&self) -> &[usize] {
        &self.shadowed
    }
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

    #[test]
    fn test_positions_follow_target_order() {
        let index =
            TargetIndex::build(["alpha", "beta", "gamma"], DuplicateNamePolicy::Reject).unwrap();

        assert_eq!(index.position("alpha"), Some(0));
        assert_eq!(index.position("gamma"), Some(2));
        assert_eq!(index.position("delta"), None);
        assert_eq!(index.len(), 3);
        assert!(index.shadowed().is_empty());
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let err = TargetIndex::build(["a", "b", "a"], DuplicateNamePolicy::default()).unwrap_err();

        match err {
            ReportError::DuplicateTargetName {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "a");
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_write_wins_keeps_later_position() {
        let index =
            TargetIndex::build(["a", "b", "a"], DuplicateNamePolicy::LastWriteWins).unwrap();

        assert_eq!(index.position("a"), Some(2));
        assert_eq!(index.len(), 2);
        assert_eq!(index.shadowed(), &[0]);
    }

    #[test]
    fn test_empty_index() {
        let index = TargetIndex::build(Vec::<&str>::new(), DuplicateNamePolicy::Reject).unwrap();
        assert!(index.is_empty());
    }
}
