//! Exact LCS diff
//!
//! Fills the full dynamic-programming table and backtracks from `(n, m)` to
//! `(0, 0)`. The result is always a shortest edit script.
//!
//! # Complexity
//!
//! - Time: O(n * m) fill + O(n + m) backtrack
//! - Space: O(n * m) `u16` counters
//!
//! # Tie-break
//!
//! Several shortest scripts usually exist. Backtracking prefers, in order,
//! `Delete`, then `Insert`, then `Match`, which makes the output unique for a
//! given input. Because the script is built tail-first and reversed, this
//! puts insertions before deletions inside a changed block.
//!
//! # Limits
//!
//! Counters are 16-bit, so inputs with `min(n, m) > MAX_LCS_LEN` are rejected
//! up front, as is any table larger than the configured cell budget. Both
//! are resource errors: the fix is the heuristic engine.

use tracing::debug;

use crate::edit::{EditOp, EditScript};
use crate::error::{DiffError, DiffResult};
use crate::fingerprint::Fingerprint;

use super::table::{LcsTable, MAX_LCS_LEN};

/// Default maximum number of table cells (2^28 cells, 512 MiB of counters).
pub const DEFAULT_MAX_TABLE_CELLS: usize = 1 << 28;

// =============================================================================
// ExactDiff
// =============================================================================

/// Quadratic, always-optimal diff engine.
#[derive(Debug, Clone, Copy)]
pub struct ExactDiff {
    max_table_cells: usize,
}

impl Default for ExactDiff {
    fn default() -> Self {
        Self::new()
    }
}

impl ExactDiff {
    pub fn new() -> Self {
        Self { max_table_cells: DEFAULT_MAX_TABLE_CELLS }
    }

    /// Cap the DP table size.
    pub fn with_max_table_cells(mut self, max_table_cells: usize) -> Self {
        self.max_table_cells = max_table_cells;
        self
    }

    pub fn max_table_cells(&self) -> usize {
        self.max_table_cells
    }

    /// Whether `a` and `b` fit this engine's counter width and cell budget.
    pub fn accepts(&self, len_a: usize, len_b: usize) -> bool {
        self.check(len_a, len_b).is_ok()
    }

    /// Build the filled DP table.
    pub fn table(&self, a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<LcsTable> {
        self.check(a.len(), b.len())?;
        LcsTable::fill(a, b, self.max_table_cells)
    }

    /// Length of the longest common subsequence
    pub fn lcs_length(&self, a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<usize> {
        if a.is_empty() || b.is_empty() {
            return Ok(0);
        }
        Ok(self.table(a, b)?.lcs_len())
    }

    /// Shortest edit script transforming `a` into `b`
    pub fn edit_script(&self, a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<EditScript> {
        // Quick paths
        if a.is_empty() {
            return Ok(EditScript::insert_all(b.len()));
        }
        if b.is_empty() {
            return Ok(EditScript::delete_all(a.len()));
        }

        let table = self.table(a, b)?;
        let script = backtrack(&table, a.len(), b.len());

        debug!(
            len_a = a.len(),
            len_b = b.len(),
            lcs = table.lcs_len(),
            ops = script.len(),
            "exact diff complete"
        );
        Ok(script)
    }

    fn check(&self, len_a: usize, len_b: usize) -> DiffResult<()> {
        if len_a.min(len_b) > MAX_LCS_LEN {
            return Err(DiffError::CounterOverflow { len_a, len_b, limit: MAX_LCS_LEN });
        }
        let cells = (len_a + 1).checked_mul(len_b + 1).unwrap_or(usize::MAX);
        if cells > self.max_table_cells {
            return Err(DiffError::TableTooLarge { cells, limit: self.max_table_cells });
        }
        Ok(())
    }
}

// =============================================================================
// Backtracking
// =============================================================================

/// Walk the table from `(n, m)` back to the origin, emitting ops tail-first.
fn backtrack(dp: &LcsTable, n: usize, m: usize) -> EditScript {
    let mut ops = Vec::with_capacity(n + m - dp.lcs_len());
    let mut i = n;
    let mut j = m;

    while i > 0 && j > 0 {
        let here = dp.get(i, j);
        if here == dp.get(i - 1, j) {
            ops.push(EditOp::Delete { pos_a: i });
            i -= 1;
        } else if here == dp.get(i, j - 1) {
            ops.push(EditOp::Insert { pos_b: j });
            j -= 1;
        } else {
            debug_assert_eq!(dp.get(i - 1, j - 1) + 1, here, "inconsistent LCS table");
            ops.push(EditOp::Match { pos_a: i, pos_b: j });
            i -= 1;
            j -= 1;
        }
    }
    while i > 0 {
        ops.push(EditOp::Delete { pos_a: i });
        i -= 1;
    }
    while j > 0 {
        ops.push(EditOp::Insert { pos_b: j });
        j -= 1;
    }

    ops.reverse();
    EditScript::new(ops)
}

// =============================================================================
// Main API
// =============================================================================

/// LCS length with default limits
pub fn lcs_length(a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<usize> {
    ExactDiff::new().lcs_length(a, b)
}

/// Shortest edit script with default limits
pub fn exact_script(a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<EditScript> {
    ExactDiff::new().edit_script(a, b)
}

// =============================================================================
// Tests
// =============================================================================
