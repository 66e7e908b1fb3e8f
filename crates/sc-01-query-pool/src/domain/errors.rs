//! Query pool error types.
//!
//! Lookups on the pool (`match_request`, `match_last`, `truncate`) never
//! fail; they answer `false` or do nothing. Errors only come from enqueueing
//! and from the service surface.

use shared_crypto::CryptoError;
use shared_types::SequenceNumber;
use thiserror::Error;

/// Query pool error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// Sequence number is already tracked.
    #[error("Duplicate sequence {seq}")]
    DuplicateSequence { seq: SequenceNumber },

    /// Sequence number does not extend the pool.
    #[error("Sequence {seq} out of order, last enqueued {last}")]
    SequenceOutOfOrder {
        seq: SequenceNumber,
        last: SequenceNumber,
    },

    /// Sequence number is not tracked (never enqueued or already truncated).
    #[error("Unknown sequence {seq}")]
    UnknownSequence { seq: SequenceNumber },

    /// Request rejected before reaching the pool.
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),
}

/// Reasons a request fails authentication.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Header batch count disagrees with the query batch.
    #[error("Batch count mismatch: header says {declared}, batch has {actual}")]
    BatchCountMismatch { declared: u64, actual: u64 },

    /// Header queries hash disagrees with the query batch.
    #[error("Queries hash mismatch")]
    QueriesHashMismatch,

    /// Signee bytes are not a valid public key.
    #[error("Invalid signee public key")]
    InvalidSignee,

    /// Signature does not verify over the header hash.
    #[error("Invalid request signature")]
    InvalidSignature,

    /// Signing a request failed.
    #[error("Signing failed: {0}")]
    Signing(#[from] CryptoError),
}
