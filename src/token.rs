//! Text tokenization
//!
//! Splits text into parts that *end* with a delimiter character, so lines,
//! words or sentences can all be compared the same way. Unlike `str::split`,
//! delimiters stay attached to their token unless `ignore_delim` is set,
//! which keeps rendered output faithful to the input.
//!
//! A `*` in the delimiter set makes every character its own token.

use compact_str::CompactString;

use crate::fingerprint::Fingerprint;

/// Default delimiter set: one token per line.
pub const DEFAULT_DELIMITERS: &str = "\n";

/// Delimiter that splits after every character.
pub const EVERY_CHAR: char = '*';

// =============================================================================
// TokenizeConfig
// =============================================================================

/// Configuration for splitting text into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeConfig {
    /// Characters that end a token.
    pub delimiters: CompactString,
    /// Drop delimiters instead of keeping them at the end of tokens.
    pub ignore_delim: bool,
    /// Lowercase the text before splitting.
    pub ignore_case: bool,
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl TokenizeConfig {
    pub fn new(delimiters: impl Into<CompactString>) -> Self {
        Self {
            delimiters: delimiters.into(),
            ignore_delim: false,
            ignore_case: false,
        }
    }

    /// Line-by-line (the default).
    pub fn lines() -> Self {
        Self::default()
    }

    /// Word-by-word: tokens end at spaces and newlines.
    pub fn words() -> Self {
        Self::new(" \n")
    }

    /// Character-by-character.
    pub fn chars() -> Self {
        Self::new("*")
    }

    pub fn with_ignore_delim(mut self, ignore_delim: bool) -> Self {
        self.ignore_delim = ignore_delim;
        self
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    fn every_char(&self) -> bool {
        self.delimiters.contains(EVERY_CHAR)
    }

    fn is_delim(&self, c: char) -> bool {
        self.delimiters.contains(c)
    }
}

// =============================================================================
// Splitting
// =============================================================================

/// Split `text` into tokens according to `config`.
///
/// ```
/// use seqdiff::token::{split, TokenizeConfig};
///
/// let tokens = split("one; two; three", &TokenizeConfig::new(";"));
/// assert_eq!(tokens, ["one;", " two;", " three"]);
///
/// let tokens = split("one; two; three", &TokenizeConfig::new("; "));
/// assert_eq!(tokens, ["one;", " ", "two;", " ", "three "]);
/// ```
pub fn split(text: &str, config: &TokenizeConfig) -> Vec<CompactString> {
    if config.ignore_case {
        return split_raw(&text.to_lowercase(), config);
    }
    split_raw(text, config)
}

fn split_raw(text: &str, config: &TokenizeConfig) -> Vec<CompactString> {
    let every_char = config.every_char();
    let mut parts = Vec::new();
    let mut buf = CompactString::default();

    for c in text.chars() {
        let is_delim = every_char || config.is_delim(c);
        if !is_delim || !config.ignore_delim || every_char {
            buf.push(c);
        }
        if is_delim && !buf.is_empty() {
            parts.push(std::mem::take(&mut buf));
        }
    }

    if !buf.is_empty() {
        // Terminate the last token like the others so it renders the same way
        if !config.ignore_delim {
            if config.is_delim('\n') {
                buf.push('\n');
            } else if config.is_delim(' ') {
                buf.push(' ');
            }
        }
        parts.push(buf);
    }
    parts
}

// =============================================================================
// Tokens
// =============================================================================

/// Token texts together with their fingerprints.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    texts: Vec<CompactString>,
    fingerprints: Vec<Fingerprint>,
}

impl Tokens {
    /// Split and fingerprint `text`.
    pub fn from_text(text: &str, config: &TokenizeConfig) -> Self {
        Self::from_parts(split(text, config))
    }

    pub fn from_parts(texts: Vec<CompactString>) -> Self {
        let fingerprints = Fingerprint::of_all(&texts);
        Self { texts, fingerprints }
    }

    pub fn texts(&self) -> &[CompactString] {
        &self.texts
    }

    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Text of the token at a 1-based position.
    pub fn at(&self, pos: usize) -> Option<&str> {
        pos.checked_sub(1).and_then(|i| self.texts.get(i)).map(CompactString::as_str)
    }
}

// =============================================================================
// Tests
// =============================================================================
