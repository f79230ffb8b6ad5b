//! seqdiff - Edit scripts between token sequences
//!
//! ## Core Concepts
//!
//! Inputs are two sequences of 64-bit [`Fingerprint`]s, one per token (line,
//! word or character). Output is an [`EditScript`] of `Match`, `Delete` and
//! `Insert` ops with 1-based positions into the inputs.
//!
//! Two engines share that contract:
//!
//! | Engine | Time | Output |
//! |--------|------|--------|
//! | [`ExactDiff`] | O(n*m) | shortest script |
//! | [`HeuristicDiff`] | ~O((n+m) log(n+m)) expected | valid, not always shortest |
//!
//! ## Modules
//! - `algo`: engines, rolling hash, DP table, engine selection
//! - `edit`: edit operations and scripts
//! - `fingerprint`: token fingerprints
//! - `token`: text to tokens
//! - `render`: scripts back to text
//!
//! ## Usage
//!
//! ```
//! use seqdiff::{DiffConfig, RenderConfig, TokenizeConfig, Tokens};
//!
//! let tokenize = TokenizeConfig::default();
//! let a = Tokens::from_text("a\nb\nc\n", &tokenize);
//! let b = Tokens::from_text("a\nc\nd\n", &tokenize);
//!
//! let script = seqdiff::diff_with_config(a.fingerprints(), b.fingerprints(), &DiffConfig::exact())?;
//! let out = seqdiff::render_script(&script, a.texts(), b.texts(), &RenderConfig::PLAIN)?;
//! assert_eq!(out, "=a\n<b\n=c\n>d\n");
//! # Ok::<(), seqdiff::DiffError>(())
//! ```

/// Algorithms: exact, heuristic, rolling hash
pub mod algo;

/// Edit operations and scripts
pub mod edit;

/// Error types
pub mod error;

/// Token fingerprints
pub mod fingerprint;

/// Prelude for common imports
pub mod prelude;

/// Script rendering
pub mod render;

/// Text tokenization
pub mod token;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{
    DiffConfig, Engine, ExactDiff, HeuristicDiff, Modulus, RangeHasher, RollingHasher,
    StableHasher, diff, diff_batch, diff_with_config, exact_script, heuristic_script, lcs_length,
};

// Scripts
pub use edit::{EditOp, EditScript, ScriptStats};

// Identity
pub use fingerprint::Fingerprint;

// Text
pub use render::{RenderConfig, render_script};
pub use token::{TokenizeConfig, Tokens};

// Error types
pub use error::{DiffError, DiffResult};
