//! Content fingerprints for token text
//!
//! blake3 truncated to 64 bits. Unlike `std`'s `DefaultHasher` the output is
//! fixed across processes and platforms, so two files can be fingerprinted
//! independently and still compare equal token for token.
//!
//! Range fingerprints over whole windows of tokens are a different job and
//! live in [`rolling`](super::rolling).

use std::hash::Hasher;

/// Deterministic 64-bit hasher backed by blake3.
///
/// Implements [`Hasher`], so anything `Hash` can be fed in, but for token text
/// [`StableHasher::token`] is the entry point.
#[derive(Clone, Default)]
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of one token's text.
    #[inline]
    pub fn token(text: &str) -> u64 {
        let mut hasher = Self::new();
        hasher.write(text.as_bytes());
        hasher.finish()
    }
}

impl Hasher for StableHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    #[inline]
    fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// First 8 bytes of the blake3 digest, little-endian.
    fn finish(&self) -> u64 {
        let digest = self.inner.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}
