//! Prelude module for common imports.
//!
//! ```
//! use seqdiff::prelude::*;
//!
//! let a = Fingerprint::of_all(&["x", "y"]);
//! let script = diff(&a, &a).unwrap();
//! assert_eq!(script.stats().matched, 2);
//! ```

// Fingerprints and scripts
pub use crate::edit::{EditOp, EditScript, ScriptStats};
pub use crate::fingerprint::Fingerprint;

// Algorithms
pub use crate::algo::{
    DiffConfig, Engine, ExactDiff, HeuristicDiff, RangeHasher, RollingHasher, diff, diff_batch,
    diff_with_config, exact_script, heuristic_script, lcs_length,
};

// Text in, text out
pub use crate::render::{RenderConfig, render_script};
pub use crate::token::{TokenizeConfig, Tokens};

// Error
pub use crate::error::{DiffError, DiffResult};
