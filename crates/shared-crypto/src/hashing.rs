//! # Double SHA-256 Hashing
//!
//! Request headers, query batches and public keys are all identified by
//! `sha256(sha256(data))`. The streaming hasher writes integers big-endian and
//! length-prefixes variable-size fields so two different field layouts can
//! never produce the same byte stream.

use sha2::{Digest, Sha256};

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Stateful double SHA-256 hasher.
#[derive(Clone, Default)]
pub struct Sha256dHasher {
    inner: Sha256,
}

impl Sha256dHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Update with raw bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Update with a big-endian `u64`.
    pub fn update_u64(&mut self, value: u64) -> &mut Self {
        self.inner.update(value.to_be_bytes());
        self
    }

    /// Update with a length-prefixed byte string.
    pub fn update_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.update_u64(data.len() as u64);
        self.inner.update(data);
        self
    }

    /// Update with a length-prefixed UTF-8 string.
    pub fn update_str(&mut self, value: &str) -> &mut Self {
        self.update_bytes(value.as_bytes())
    }

    /// Finalize and return `sha256(sha256(stream))`.
    pub fn finalize(self) -> Hash {
        let first = self.inner.finalize();
        Sha256::digest(first).into()
    }
}

/// Compute single SHA-256 hash of data.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash of data.
#[inline]
pub fn sha256d(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}
