//! # Shared Crypto - Node Identity Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 | Request signing, node identity |
//! | `hashing` | SHA-256d | Header and content digests |
//! | `address` | Base58Check | Account addresses of signees |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalized, 32-byte digests only
//! - **Bypass**: per-engine [`SignatureConfig`], no process-wide switch

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use address::{AccountAddress, Network};
pub use ecdsa::{
    Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature, SignatureConfig, SignatureEngine,
};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256d, Hash, Sha256dHasher};
