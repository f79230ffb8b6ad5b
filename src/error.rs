//! Error types for seqdiff.
//!
//! The engines are pure, so every error here is either a resource limit or a
//! configuration the 16-bit table cannot represent. Recovery means picking the
//! other engine, never retrying the same call.

use thiserror::Error;

/// Errors that can occur while computing an edit script.
#[derive(Debug, Error)]
pub enum DiffError {
    /// The LCS could exceed what the narrow table counters can hold
    #[error(
        "LCS counter overflow: inputs of length {len_a} and {len_b} may exceed the {limit} counter limit; use the heuristic engine"
    )]
    CounterOverflow {
        /// Length of the first sequence
        len_a: usize,
        /// Length of the second sequence
        len_b: usize,
        /// Largest LCS length the table can represent
        limit: usize,
    },

    /// The DP table would be larger than the configured cell budget
    #[error("DP table too large: {cells} cells exceeds limit of {limit}")]
    TableTooLarge {
        /// Requested cell count (saturated on overflow)
        cells: usize,
        /// Configured maximum
        limit: usize,
    },

    /// The allocator refused the DP table
    #[error("failed to allocate DP table of {cells} cells")]
    AllocationFailed {
        /// Requested cell count
        cells: usize,
    },

    /// The heuristic split tree nested deeper than allowed
    #[error("heuristic split depth {depth} exceeds limit of {limit}")]
    DepthExceeded {
        /// Depth that was reached
        depth: usize,
        /// Configured maximum
        limit: usize,
    },

    /// An edit script does not describe the sequences it was checked against
    #[error("invalid edit script: {0}")]
    InvalidScript(String),
}

/// Result type alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create an invalid-script error with a message.
    pub fn invalid_script(msg: impl Into<String>) -> Self {
        Self::InvalidScript(msg.into())
    }

    /// Whether switching to the heuristic engine can avoid this error.
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            Self::CounterOverflow { .. } | Self::TableTooLarge { .. } | Self::AllocationFailed { .. }
        )
    }
}
