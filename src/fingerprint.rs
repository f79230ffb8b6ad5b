//! Content fingerprints for tokens
//!
//! The engines never look at token text. A tokenizer reduces every line, word
//! or character to a 64-bit [`Fingerprint`] and the engines compare those by
//! equality only.
//!
//! Fingerprints come from blake3 via [`StableHasher`](crate::algo::StableHasher),
//! so the same text yields the same value in every process.

use std::fmt;

/// 64-bit fingerprint of one token
///
/// # Memory Layout
///
/// - 8 bytes (u64)
/// - Copy, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[must_use]
pub struct Fingerprint(pub(crate) u64);

impl Fingerprint {
    /// Create a Fingerprint from a raw u64 value.
    ///
    /// Tests and callers with their own hashing use this; text input should go
    /// through [`Fingerprint::of_str`].
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Fingerprint a token's text
    ///
    /// ```
    /// use seqdiff::Fingerprint;
    ///
    /// assert_eq!(Fingerprint::of_str("abacaba"), Fingerprint::of_str("abacaba"));
    /// assert_ne!(Fingerprint::of_str("abacaba"), Fingerprint::of_str("abracadabra"));
    /// ```
    #[inline]
    pub fn of_str(text: &str) -> Self {
        Self(crate::algo::StableHasher::token(text))
    }

    /// Fingerprint every token in order
    pub fn of_all<S: AsRef<str>>(tokens: &[S]) -> Vec<Self> {
        tokens.iter().map(|t| Self::of_str(t.as_ref())).collect()
    }
}

impl From<u64> for Fingerprint {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:016x})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rustc_hash::FxHashSet;

    #[test]
    fn test_of_str_deterministic() {
        assert_eq!(Fingerprint::of_str("a\nb"), Fingerprint::of_str("a\nb"));
        assert_eq!(
            Fingerprint::of_str("Abc\nГде\n\n\n789\n#!?"),
            Fingerprint::of_str("Abc\nГде\n\n\n789\n#!?")
        );
    }

    #[test]
    fn test_of_str_distinguishes_near_misses() {
        let pairs = [
            ("", "\n"),
            ("\n", "\n\n"),
            ("a\n", "a\na\n"),
            ("a\n", "a\n\n"),
            ("a\n", "aa\n"),
            ("aa\n", "aaa\n"),
        ];
        for (a, b) in pairs {
            assert_ne!(Fingerprint::of_str(a), Fingerprint::of_str(b), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_no_collisions_among_many_strings() {
        let mut seen = FxHashSet::default();
        for i in 0..10_000u32 {
            seen.insert(Fingerprint::of_str(&format!("line {i} {}", i.wrapping_mul(2_654_435_761))));
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn test_of_all_preserves_order() {
        let fps = Fingerprint::of_all(&["x", "y", "x"]);
        assert_eq!(fps.len(), 3);
        assert_eq!(fps[0], fps[2]);
        assert_ne!(fps[0], fps[1]);
    }

    #[test]
    fn test_display_format() {
        let fp = Fingerprint::from_raw(0x123456789abcdef0);
        assert_eq!(format!("{}", fp), "#123456789abcdef0");
        assert_eq!(format!("{:?}", fp), "Fingerprint(123456789abcdef0)");
    }
}
