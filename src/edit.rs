//! Edit scripts
//!
//! An [`EditScript`] is the output of every engine: an ordered list of
//! [`EditOp`]s that walks both input sequences front to back.
//!
//! # Invariants
//!
//! - Keeping `Match`/`Delete` ops and reading `pos_a` in order yields `1..=|A|`
//! - Keeping `Match`/`Insert` ops and reading `pos_b` in order yields `1..=|B|`
//! - A `Match` pairs equal tokens
//!
//! Positions are 1-based into the original sequences.

use crate::error::{DiffError, DiffResult};
use crate::fingerprint::Fingerprint;

// =============================================================================
// Public Types
// =============================================================================

/// Edit operation in an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Token `pos_a` of A is kept and corresponds to token `pos_b` of B
    Match { pos_a: usize, pos_b: usize },
    /// Token `pos_a` of A is deleted
    Delete { pos_a: usize },
    /// Token `pos_b` of B is inserted
    Insert { pos_b: usize },
}

impl EditOp {
    pub fn is_match(&self) -> bool {
        matches!(self, EditOp::Match { .. })
    }

    /// Position in A, if this op consumes a token of A
    pub fn pos_a(&self) -> Option<usize> {
        match *self {
            EditOp::Match { pos_a, .. } | EditOp::Delete { pos_a } => Some(pos_a),
            EditOp::Insert { .. } => None,
        }
    }

    /// Position in B, if this op consumes a token of B
    pub fn pos_b(&self) -> Option<usize> {
        match *self {
            EditOp::Match { pos_b, .. } | EditOp::Insert { pos_b } => Some(pos_b),
            EditOp::Delete { .. } => None,
        }
    }
}

/// Ordered edit operations transforming A into B
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct EditScript {
    pub ops: Vec<EditOp>,
}

/// Statistics about an edit script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStats {
    pub matched: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl ScriptStats {
    /// Total number of edit operations (not counting matches)
    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted
    }

    /// Check if there are no changes
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// EditScript
// =============================================================================

impl EditScript {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    /// Script for A empty: insert all of B
    pub fn insert_all(len_b: usize) -> Self {
        Self::new((1..=len_b).map(|pos_b| EditOp::Insert { pos_b }).collect())
    }

    /// Script for B empty: delete all of A
    pub fn delete_all(len_a: usize) -> Self {
        Self::new((1..=len_a).map(|pos_a| EditOp::Delete { pos_a }).collect())
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Number of matched pairs, i.e. the common subsequence length the script realizes
    pub fn common_len(&self) -> usize {
        self.ops.iter().filter(|op| op.is_match()).count()
    }

    pub fn stats(&self) -> ScriptStats {
        let mut stats = ScriptStats::default();
        for op in &self.ops {
            match op {
                EditOp::Match { .. } => stats.matched += 1,
                EditOp::Insert { .. } => stats.inserted += 1,
                EditOp::Delete { .. } => stats.deleted += 1,
            }
        }
        stats
    }

    /// Rebuild A from the script's `Match`/`Delete` positions
    pub fn reconstruct_a<T: Copy>(&self, a: &[T]) -> Vec<T> {
        self.ops.iter().filter_map(EditOp::pos_a).map(|p| a[p - 1]).collect()
    }

    /// Rebuild B from the script's `Match`/`Insert` positions
    pub fn reconstruct_b<T: Copy>(&self, b: &[T]) -> Vec<T> {
        self.ops.iter().filter_map(EditOp::pos_b).map(|p| b[p - 1]).collect()
    }

    /// Check that this script is a valid alignment of `a` and `b`
    ///
    /// Every index of both sequences must appear exactly once, in order, and
    /// every `Match` must pair equal fingerprints.
    pub fn verify(&self, a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<()> {
        let mut next_a = 1;
        let mut next_b = 1;

        for (idx, op) in self.ops.iter().enumerate() {
            if let Some(pos_a) = op.pos_a() {
                if pos_a != next_a || pos_a > a.len() {
                    return Err(DiffError::invalid_script(format!(
                        "op {idx}: expected A position {next_a}, found {pos_a}"
                    )));
                }
                next_a += 1;
            }
            if let Some(pos_b) = op.pos_b() {
                if pos_b != next_b || pos_b > b.len() {
                    return Err(DiffError::invalid_script(format!(
                        "op {idx}: expected B position {next_b}, found {pos_b}"
                    )));
                }
                next_b += 1;
            }
            if let EditOp::Match { pos_a, pos_b } = *op {
                if a[pos_a - 1] != b[pos_b - 1] {
                    return Err(DiffError::invalid_script(format!(
                        "op {idx}: match pairs unequal tokens A[{pos_a}] and B[{pos_b}]"
                    )));
                }
            }
        }

        if next_a != a.len() + 1 || next_b != b.len() + 1 {
            return Err(DiffError::invalid_script(format!(
                "script covers {} of {} A tokens and {} of {} B tokens",
                next_a - 1,
                a.len(),
                next_b - 1,
                b.len()
            )));
        }
        Ok(())
    }
}

impl From<Vec<EditOp>> for EditScript {
    fn from(ops: Vec<EditOp>) -> Self {
        Self::new(ops)
    }
}

impl IntoIterator for EditScript {
    type Item = EditOp;
    type IntoIter = std::vec::IntoIter<EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps(nums: &[u64]) -> Vec<Fingerprint> {
        nums.iter().map(|&n| Fingerprint::from_raw(n)).collect()
    }

    #[test]
    fn test_insert_and_delete_all() {
        let script = EditScript::insert_all(3);
        assert_eq!(script.stats().inserted, 3);
        assert!(script.verify(&[], &fps(&[1, 2, 3])).is_ok());

        let script = EditScript::delete_all(2);
        assert_eq!(script.stats().deleted, 2);
        assert!(script.verify(&fps(&[1, 2]), &[]).is_ok());
    }

    #[test]
    fn test_empty_script() {
        let script = EditScript::default();
        assert!(script.is_empty());
        assert!(script.stats().is_empty());
        assert!(script.verify(&[], &[]).is_ok());
    }

    #[test]
    fn test_positions() {
        let op = EditOp::Match { pos_a: 2, pos_b: 5 };
        assert!(op.is_match());
        assert_eq!(op.pos_a(), Some(2));
        assert_eq!(op.pos_b(), Some(5));
        assert_eq!(EditOp::Delete { pos_a: 1 }.pos_b(), None);
        assert_eq!(EditOp::Insert { pos_b: 1 }.pos_a(), None);
    }

    #[test]
    fn test_reconstruct() {
        let a = fps(&[1, 3, 2]);
        let b = fps(&[3, 4]);
        let script = EditScript::new(vec![
            EditOp::Delete { pos_a: 1 },
            EditOp::Match { pos_a: 2, pos_b: 1 },
            EditOp::Insert { pos_b: 2 },
            EditOp::Delete { pos_a: 3 },
        ]);
        assert_eq!(script.reconstruct_a(&a), a);
        assert_eq!(script.reconstruct_b(&b), b);
        assert_eq!(script.common_len(), 1);
        assert_eq!(script.stats(), ScriptStats { matched: 1, inserted: 1, deleted: 2 });
        assert!(script.verify(&a, &b).is_ok());
    }

    #[test]
    fn test_verify_rejects_out_of_order() {
        let a = fps(&[1, 2]);
        let script = EditScript::new(vec![EditOp::Delete { pos_a: 2 }, EditOp::Delete { pos_a: 1 }]);
        assert!(matches!(script.verify(&a, &[]), Err(DiffError::InvalidScript(_))));
    }

    #[test]
    fn test_verify_rejects_missing_tokens() {
        let a = fps(&[1, 2]);
        let script = EditScript::new(vec![EditOp::Delete { pos_a: 1 }]);
        assert!(script.verify(&a, &[]).is_err());
    }

    #[test]
    fn test_verify_rejects_unequal_match() {
        let a = fps(&[1]);
        let b = fps(&[2]);
        let script = EditScript::new(vec![EditOp::Match { pos_a: 1, pos_b: 1 }]);
        assert!(script.verify(&a, &b).is_err());
    }

    #[test]
    fn test_verify_rejects_out_of_range() {
        let a = fps(&[1]);
        let script = EditScript::new(vec![EditOp::Delete { pos_a: 1 }, EditOp::Delete { pos_a: 2 }]);
        assert!(script.verify(&a, &[]).is_err());
    }
}
