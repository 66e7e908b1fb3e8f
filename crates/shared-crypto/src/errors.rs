//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Only 32-byte digests may be signed or verified.
    #[error("Invalid hash length: expected {expected}, got {actual}")]
    InvalidHashLength {
        /// Expected hash length in bytes
        expected: usize,
        /// Actual hash length in bytes
        actual: usize,
    },

    /// Signing failed inside the curve implementation
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Address string could not be decoded
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
