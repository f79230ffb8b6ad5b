//! Flat LCS table
//!
//! `(n+1) x (m+1)` counters in one row-major buffer, addressed by
//! `row * cols + col`. Counters are `u16` for cache density; callers must
//! reject inputs whose LCS could exceed [`MAX_LCS_LEN`] before building.

use crate::error::{DiffError, DiffResult};
use crate::fingerprint::Fingerprint;

/// Largest LCS length the table may hold.
pub const MAX_LCS_LEN: usize = i16::MAX as usize;

/// Dense DP table for the LCS recurrence.
#[derive(Debug, Clone)]
pub struct LcsTable {
    cells: Vec<u16>,
    rows: usize,
    cols: usize,
}

impl LcsTable {
    /// Allocate a zeroed `rows x cols` table without aborting on failure.
    pub(crate) fn zeroed(rows: usize, cols: usize, max_cells: usize) -> DiffResult<Self> {
        let len = rows.checked_mul(cols).ok_or(DiffError::TableTooLarge {
            cells: usize::MAX,
            limit: max_cells,
        })?;
        if len > max_cells {
            return Err(DiffError::TableTooLarge { cells: len, limit: max_cells });
        }

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| DiffError::AllocationFailed { cells: len })?;
        cells.resize(len, 0);

        Ok(Self { cells, rows, cols })
    }

    /// Fill the table for `a` (rows) against `b` (columns).
    ///
    /// `dp[i][j]` is the LCS length of `a[..i]` and `b[..j]`. Row 0 and column 0
    /// stay zero.
    pub(crate) fn fill(a: &[Fingerprint], b: &[Fingerprint], max_cells: usize) -> DiffResult<Self> {
        let mut table = Self::zeroed(a.len() + 1, b.len() + 1, max_cells)?;
        let cols = table.cols;

        for i in 1..=a.len() {
            let above = (i - 1) * cols;
            let row = i * cols;
            let token = a[i - 1];
            for j in 1..=b.len() {
                table.cells[row + j] = if token == b[j - 1] {
                    table.cells[above + j - 1] + 1
                } else {
                    let up = table.cells[above + j];
                    let left = table.cells[row + j - 1];
                    if up > left { up } else { left }
                };
            }
        }

        Ok(table)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u16) {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `dp[n][m]`: the LCS length of the full inputs
    pub fn lcs_len(&self) -> usize {
        usize::from(self.get(self.rows - 1, self.cols - 1))
    }
}
