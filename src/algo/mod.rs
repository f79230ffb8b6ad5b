//! Sequence alignment algorithms.
//!
//! - `exact`: O(n*m) DP table with deterministic backtracking
//! - `heuristic`: rolling-hash anchor-and-split, sub-quadratic, approximate
//! - `rolling`: polynomial range hashing used by the heuristic
//! - `table`: flat 16-bit LCS table
//! - `hash`: stable content hashing for tokens
//!
//! Engine choice is the caller's: [`Engine::Auto`] picks once, before running,
//! and a failed engine is never retried with the other one.

mod exact;
mod hash;
mod heuristic;
mod rolling;
mod table;

pub use exact::{DEFAULT_MAX_TABLE_CELLS, ExactDiff, exact_script, lcs_length};
pub use hash::StableHasher;
pub use heuristic::{DEFAULT_MAX_DEPTH, HeuristicDiff, heuristic_script};
pub use rolling::{
    CONTENT_BASE, CONTENT_MODULUS, DEFAULT_BASE, Modulus, RangeHasher, RollingHasher,
};
pub use table::{LcsTable, MAX_LCS_LEN};

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::edit::EditScript;
use crate::error::DiffResult;
use crate::fingerprint::Fingerprint;

// =============================================================================
// Engine
// =============================================================================

/// Which diff engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Full DP table, always shortest
    Exact,
    /// Rolling-hash anchors, fast, not always shortest
    Heuristic,
    /// Exact when the table fits the configured limits, heuristic otherwise
    #[default]
    Auto,
}

impl Engine {
    pub const fn name(self) -> &'static str {
        match self {
            Engine::Exact => "exact",
            Engine::Heuristic => "heuristic",
            Engine::Auto => "auto",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Engine::Exact),
            "heuristic" => Ok(Engine::Heuristic),
            "auto" => Ok(Engine::Auto),
            other => Err(format!("unknown engine '{other}' (expected exact, heuristic or auto)")),
        }
    }
}

// =============================================================================
// DiffConfig
// =============================================================================

/// Configuration for engine choice and resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Engine to run.
    /// Default: Auto
    pub engine: Engine,
    /// Maximum DP table cells for the exact engine.
    /// Default: 2^28
    pub max_table_cells: usize,
    /// Maximum split nesting for the heuristic engine.
    /// Default: 1_000_000
    pub max_depth: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Auto,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiffConfig {
    /// Create config with a specific engine and default limits.
    pub fn new(engine: Engine) -> Self {
        Self { engine, ..Self::default() }
    }

    /// Always run the exact engine.
    pub fn exact() -> Self {
        Self::new(Engine::Exact)
    }

    /// Always run the heuristic engine.
    pub fn heuristic() -> Self {
        Self::new(Engine::Heuristic)
    }

    /// Auto selection with a 4x larger table budget.
    pub fn large() -> Self {
        Self { max_table_cells: DEFAULT_MAX_TABLE_CELLS * 4, ..Self::default() }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_max_table_cells(mut self, max_table_cells: usize) -> Self {
        self.max_table_cells = max_table_cells;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn exact_engine(&self) -> ExactDiff {
        ExactDiff::new().with_max_table_cells(self.max_table_cells)
    }

    fn heuristic_engine(&self) -> HeuristicDiff {
        HeuristicDiff::new().with_max_depth(self.max_depth)
    }

    /// The concrete engine `Auto` resolves to for inputs of these lengths.
    pub fn resolve(&self, len_a: usize, len_b: usize) -> Engine {
        match self.engine {
            Engine::Auto if self.exact_engine().accepts(len_a, len_b) => Engine::Exact,
            Engine::Auto => Engine::Heuristic,
            engine => engine,
        }
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Diff two fingerprint sequences with default configuration
pub fn diff(a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<EditScript> {
    diff_with_config(a, b, &DiffConfig::default())
}

/// Diff two fingerprint sequences with custom configuration
pub fn diff_with_config(
    a: &[Fingerprint],
    b: &[Fingerprint],
    config: &DiffConfig,
) -> DiffResult<EditScript> {
    let engine = config.resolve(a.len(), b.len());
    debug!(requested = %config.engine, %engine, len_a = a.len(), len_b = b.len(), "engine selected");

    match engine {
        Engine::Heuristic => config.heuristic_engine().edit_script(a, b),
        _ => config.exact_engine().edit_script(a, b),
    }
}

/// Diff many independent pairs
///
/// Each pair gets its own table, hashers and search state. With the
/// `parallel` feature the pairs run on the rayon pool.
pub fn diff_batch<A, B>(pairs: &[(A, B)], config: &DiffConfig) -> Vec<DiffResult<EditScript>>
where
    A: AsRef<[Fingerprint]> + Sync,
    B: AsRef<[Fingerprint]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pairs
            .par_iter()
            .map(|(a, b)| diff_with_config(a.as_ref(), b.as_ref(), config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pairs
            .iter()
            .map(|(a, b)| diff_with_config(a.as_ref(), b.as_ref(), config))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
