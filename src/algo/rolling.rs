//! Polynomial rolling hash over token sequences
//!
//! After an O(n) build, the hash of any half-open range `[l, r)` costs O(1):
//!
//! ```text
//! range_hash(l, r) = prefix[r] - prefix[l] * base^(r - l)   (mod M)
//! ```
//!
//! The value depends only on the tokens inside the range, never on where the
//! range starts, so equal windows always hash equal. Unequal windows collide
//! with birthday-bound probability.
//!
//! Two arithmetic modes are provided:
//!
//! | Modulus | Arithmetic | Typical role |
//! |---------|------------|--------------|
//! | `Wrapping` | u64 wraparound (M = 2^64) | range fingerprinting (default) |
//! | `Prime(p)` | reduced mod p via u128 | content-style hashing |

use crate::fingerprint::Fingerprint;

/// Default base for range hashing.
pub const DEFAULT_BASE: u64 = 263;

/// Base used with [`CONTENT_MODULUS`].
pub const CONTENT_BASE: u64 = 59;

/// Prime modulus for the explicit-modulus instantiation (10^17 + 3).
pub const CONTENT_MODULUS: u64 = 100_000_000_000_000_003;

// =============================================================================
// RangeHasher
// =============================================================================

/// O(1) hashing of contiguous token ranges.
///
/// The heuristic engine is generic over this trait so collision handling can
/// be tested with a hasher that deliberately collides.
pub trait RangeHasher: Sized {
    /// Precompute whatever the hasher needs for `tokens`.
    fn build(tokens: &[Fingerprint]) -> Self;

    /// Hash of the half-open range `[l, r)`, `l <= r <= len`.
    fn range_hash(&self, l: usize, r: usize) -> u64;
}

// =============================================================================
// Modulus
// =============================================================================

/// Arithmetic used by a [`RollingHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modulus {
    /// Natural u64 wraparound
    #[default]
    Wrapping,
    /// Explicit modulus; must be non-zero
    Prime(u64),
}

impl Modulus {
    #[inline]
    fn reduce(self, v: u64) -> u64 {
        match self {
            Modulus::Wrapping => v,
            Modulus::Prime(p) => v % p,
        }
    }

    #[inline]
    fn add(self, x: u64, y: u64) -> u64 {
        match self {
            Modulus::Wrapping => x.wrapping_add(y),
            Modulus::Prime(p) => ((u128::from(x) + u128::from(y)) % u128::from(p)) as u64,
        }
    }

    #[inline]
    fn sub(self, x: u64, y: u64) -> u64 {
        match self {
            Modulus::Wrapping => x.wrapping_sub(y),
            Modulus::Prime(p) => ((u128::from(x) + u128::from(p) - u128::from(y)) % u128::from(p)) as u64,
        }
    }

    #[inline]
    fn mul(self, x: u64, y: u64) -> u64 {
        match self {
            Modulus::Wrapping => x.wrapping_mul(y),
            Modulus::Prime(p) => ((u128::from(x) * u128::from(y)) % u128::from(p)) as u64,
        }
    }
}

// =============================================================================
// RollingHasher
// =============================================================================

/// Prefix hashes and base powers for one token sequence.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct RollingHasher {
    modulus: Modulus,
    prefix: Vec<u64>,
    powers: Vec<u64>,
}

impl RollingHasher {
    /// Build with wraparound arithmetic.
    pub fn new(tokens: &[Fingerprint], base: u64) -> Self {
        Self::with_modulus(tokens, base, Modulus::Wrapping)
    }

    /// Build with explicit arithmetic.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is `Prime(0)`.
    pub fn with_modulus(tokens: &[Fingerprint], base: u64, modulus: Modulus) -> Self {
        assert!(modulus != Modulus::Prime(0), "rolling hash modulus must be non-zero");

        let base = modulus.reduce(base);
        let mut prefix = Vec::with_capacity(tokens.len() + 1);
        let mut powers = Vec::with_capacity(tokens.len() + 1);
        prefix.push(0);
        powers.push(modulus.reduce(1));

        for (i, token) in tokens.iter().enumerate() {
            let token = modulus.reduce(token.as_raw());
            prefix.push(modulus.add(modulus.mul(prefix[i], base), token));
            powers.push(modulus.mul(powers[i], base));
        }

        Self { modulus, prefix, powers }
    }

    /// Number of tokens hashed
    pub fn len(&self) -> usize {
        self.prefix.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    /// Hash of tokens `[l, r)`
    ///
    /// # Panics
    ///
    /// Panics unless `l <= r <= len`.
    #[inline]
    pub fn range_hash(&self, l: usize, r: usize) -> u64 {
        assert!(l <= r && r <= self.len(), "range [{l}, {r}) out of bounds for length {}", self.len());
        let m = self.modulus;
        m.sub(self.prefix[r], m.mul(self.prefix[l], self.powers[r - l]))
    }
}

impl RangeHasher for RollingHasher {
    fn build(tokens: &[Fingerprint]) -> Self {
        Self::new(tokens, DEFAULT_BASE)
    }

    #[inline]
    fn range_hash(&self, l: usize, r: usize) -> u64 {
        RollingHasher::range_hash(self, l, r)
    }
}

// =============================================================================
// Tests
// =============================================================================
