//! Edit script rendering
//!
//! Maps each op back to its token text. Plain output prefixes every token with
//! a marker; colored output paints deletions red and insertions green.
//!
//! | Op | Plain | Color |
//! |----|-------|-------|
//! | Match | `=text` | text |
//! | Delete | `<text` | red text |
//! | Insert | `>text` | green text |

use colored::Color;

use crate::edit::{EditOp, EditScript};
use crate::error::{DiffError, DiffResult};

// =============================================================================
// RenderConfig
// =============================================================================

/// Marker for tokens kept from both sides.
pub const MATCH_MARKER: char = '=';
/// Marker for tokens only in A.
pub const DELETE_MARKER: char = '<';
/// Marker for tokens only in B.
pub const INSERT_MARKER: char = '>';

/// Configuration for rendering edit scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Use ANSI colors instead of markers.
    pub color: bool,
    /// Appended after every token.
    pub output_delim: String,
}

impl RenderConfig {
    /// Markers, no separator.
    pub const PLAIN: Self = Self {
        color: false,
        output_delim: String::new(),
    };

    /// Colors, no separator.
    pub const COLOR: Self = Self {
        color: true,
        output_delim: String::new(),
    };

    /// Create a new config.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            output_delim: String::new(),
        }
    }

    /// Set the string written after every token.
    pub fn with_output_delim(mut self, delim: impl Into<String>) -> Self {
        self.output_delim = delim.into();
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::PLAIN
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a script against the token texts it was computed from.
///
/// Fails if an op points outside `a` or `b`.
pub fn render_script<S: AsRef<str>>(
    script: &EditScript,
    a: &[S],
    b: &[S],
    config: &RenderConfig,
) -> DiffResult<String> {
    let mut output = String::new();
    for op in script {
        render_op(*op, a, b, config, &mut output)?;
    }
    Ok(output)
}

fn render_op<S: AsRef<str>>(
    op: EditOp,
    a: &[S],
    b: &[S],
    config: &RenderConfig,
    output: &mut String,
) -> DiffResult<()> {
    match op {
        EditOp::Match { pos_a, .. } => {
            let text = token_at(a, pos_a, "A")?;
            if !config.color {
                output.push(MATCH_MARKER);
            }
            output.push_str(text);
        }
        EditOp::Delete { pos_a } => {
            let text = token_at(a, pos_a, "A")?;
            if config.color {
                push_colored(output, Color::Red, text);
            } else {
                output.push(DELETE_MARKER);
                output.push_str(text);
            }
        }
        EditOp::Insert { pos_b } => {
            let text = token_at(b, pos_b, "B")?;
            if config.color {
                push_colored(output, Color::Green, text);
            } else {
                output.push(INSERT_MARKER);
                output.push_str(text);
            }
        }
    }
    output.push_str(&config.output_delim);
    Ok(())
}

/// Wrap `text` in ANSI foreground codes regardless of terminal detection.
fn push_colored(output: &mut String, color: Color, text: &str) {
    output.push_str("\x1b[");
    output.push_str(&color.to_fg_str());
    output.push('m');
    output.push_str(text);
    output.push_str("\x1b[0m");
}

fn token_at<'a, S: AsRef<str>>(tokens: &'a [S], pos: usize, side: &str) -> DiffResult<&'a str> {
    pos.checked_sub(1)
        .and_then(|i| tokens.get(i))
        .map(|t| t.as_ref())
        .ok_or_else(|| {
            DiffError::invalid_script(format!(
                "position {pos} out of range for {side} with {} tokens",
                tokens.len()
            ))
        })
}

// =============================================================================
// Tests
// =============================================================================
