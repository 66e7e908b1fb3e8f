//! # ECDSA Signatures (secp256k1)
//!
//! Node identity signatures over 32-byte digests.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (same key and digest yield the same signature)
//! - Low-S normalized output
//! - Only pre-hashed 32-byte messages are accepted; callers hash first
//!
//! ## Signature Bypass
//!
//! Test networks may run with signature checking disabled. The switch lives
//! in [`SignatureConfig`] and is owned by one [`SignatureEngine`] instance, so
//! two engines in the same process can disagree about it.

use crate::CryptoError;
use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature, SigningKey, VerifyingKey,
};

/// Length of a digest accepted by [`SignatureEngine::sign`].
pub const HASH_LENGTH: usize = 32;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Signature handed out by a bypassed engine. Never valid on a real engine.
    pub const fn placeholder() -> Self {
        Self([0u8; 64])
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        // SEC1 compressed encoding is always 0x02/0x03 followed by the x-coordinate
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        Secp256k1PublicKey(bytes)
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Signature engine settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignatureConfig {
    /// Skip real signing and accept every signature. Test networks only.
    pub bypass: bool,
}

/// Signs and verifies 32-byte digests under one [`SignatureConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SignatureEngine {
    config: SignatureConfig,
}

impl SignatureEngine {
    /// Create an engine with the given settings.
    pub fn new(config: SignatureConfig) -> Self {
        Self { config }
    }

    /// Returns true if this engine skips signature checks.
    pub fn is_bypassed(&self) -> bool {
        self.config.bypass
    }

    /// Sign a 32-byte digest (deterministic RFC 6979).
    ///
    /// # Errors
    /// - `InvalidHashLength` if `hash` is not exactly 32 bytes
    /// - `SigningFailed` if the curve rejects the digest
    pub fn sign(
        &self,
        keypair: &Secp256k1KeyPair,
        hash: &[u8],
    ) -> Result<Secp256k1Signature, CryptoError> {
        check_hash_length(hash)?;
        if self.config.bypass {
            return Ok(Secp256k1Signature::placeholder());
        }

        let sig: Signature = keypair
            .signing_key
            .sign_prehash(hash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(Secp256k1Signature(sig.to_bytes().into()))
    }

    /// Verify a signature over a 32-byte digest against `signee`.
    ///
    /// Returns false for malformed keys, malformed signatures and wrong
    /// digest lengths. A bypassed engine returns true unconditionally.
    pub fn verify(
        &self,
        hash: &[u8],
        signature: &Secp256k1Signature,
        signee: &Secp256k1PublicKey,
    ) -> bool {
        if self.config.bypass {
            return true;
        }
        if check_hash_length(hash).is_err() {
            return false;
        }

        let Ok(verifying_key) = signee.verifying_key() else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(&signature.0) else {
            return false;
        };
        verifying_key.verify_prehash(hash, &sig).is_ok()
    }
}

fn check_hash_length(hash: &[u8]) -> Result<(), CryptoError> {
    if hash.len() != HASH_LENGTH {
        return Err(CryptoError::InvalidHashLength {
            expected: HASH_LENGTH,
            actual: hash.len(),
        });
    }
    Ok(())
}
