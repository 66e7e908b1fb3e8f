//! # Core Domain Entities
//!
//! Client SQL requests and the responses produced by executing them.
//!
//! ## Clusters
//!
//! - **Requests**: `RequestHeader`, `Query`, `Request`
//! - **Responses**: `ResponseHeader`, `ResponsePayload`, `Response`
//! - **Identity**: `NodeId`, `Hash`, `SequenceNumber`

use serde::{Deserialize, Serialize};
use shared_crypto::Sha256dHasher;

pub use shared_crypto::Hash;

/// Chain-wide position assigned by the ordering layer.
pub type SequenceNumber = u64;

/// A 33-byte compressed secp256k1 public key.
pub type PublicKeyBytes = [u8; 33];

/// A 64-byte r||s secp256k1 signature.
pub type SignatureBytes = [u8; 64];

/// Unique identifier for a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub [u8; 32]);

/// Types of stable content digests.
///
/// Two values with equal digests are treated as the same content.
pub trait ContentDigest {
    /// Returns the digest. Must be cheap and must never change for a value.
    fn content_digest(&self) -> Hash;
}

// =============================================================================
// CLUSTER A: REQUESTS
// =============================================================================

/// Whether a request only reads or also writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueryType {
    /// Read-only query batch.
    #[default]
    Read,
    /// Query batch with writes.
    Write,
}

impl QueryType {
    fn tag(self) -> u64 {
        match self {
            QueryType::Read => 0,
            QueryType::Write => 1,
        }
    }
}

/// A named argument bound into a query pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArg {
    /// Parameter name without the sigil.
    pub name: String,
    /// Parameter value as text.
    pub value: String,
}

/// One SQL statement with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// SQL pattern.
    pub pattern: String,
    /// Bound arguments.
    pub args: Vec<NamedArg>,
}

impl Query {
    /// Creates a query without arguments.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            args: Vec::new(),
        }
    }

    /// Adds a named argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(NamedArg {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Digest over a query batch, stored in `RequestHeader::queries_hash`.
pub fn queries_hash(queries: &[Query]) -> Hash {
    let mut hasher = Sha256dHasher::new();
    hasher.update_u64(queries.len() as u64);
    for query in queries {
        hasher.update_str(&query.pattern);
        hasher.update_u64(query.args.len() as u64);
        for arg in &query.args {
            hasher.update_str(&arg.name).update_str(&arg.value);
        }
    }
    hasher.finalize()
}

/// Signed part of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    /// Read or write batch.
    pub query_type: QueryType,
    /// Node that issued the request.
    pub node_id: NodeId,
    /// Target database.
    pub database_id: String,
    /// Client connection identifier.
    pub connection_id: u64,
    /// Per-connection request counter.
    pub seq_no: u64,
    /// Issue time (ms since UNIX epoch).
    pub timestamp_ms: u64,
    /// Number of queries in the batch.
    pub batch_count: u64,
    /// `queries_hash` over the batch.
    pub queries_hash: Hash,
}

impl RequestHeader {
    /// Computes the header digest (sha256d over the canonical field encoding).
    pub fn compute_hash(&self) -> Hash {
        let mut hasher = Sha256dHasher::new();
        hasher
            .update_u64(self.query_type.tag())
            .update(&self.node_id.0)
            .update_str(&self.database_id)
            .update_u64(self.connection_id)
            .update_u64(self.seq_no)
            .update_u64(self.timestamp_ms)
            .update_u64(self.batch_count)
            .update(&self.queries_hash);
        hasher.finalize()
    }
}

/// An immutable, signed client request.
///
/// The header digest is computed once in [`Request::new`] and cached; every
/// later comparison uses the cached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    header: RequestHeader,
    queries: Vec<Query>,
    signee: PublicKeyBytes,
    signature: SignatureBytes,
    header_hash: Hash,
}

impl Request {
    /// Seals a request. The header digest is computed here.
    pub fn new(
        header: RequestHeader,
        queries: Vec<Query>,
        signee: PublicKeyBytes,
        signature: SignatureBytes,
    ) -> Self {
        let header_hash = header.compute_hash();
        Self {
            header,
            queries,
            signee,
            signature,
            header_hash,
        }
    }

    /// Signed header.
    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    /// Query batch.
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Compressed public key of the signer.
    pub fn signee(&self) -> &PublicKeyBytes {
        &self.signee
    }

    /// Signature over `header_hash`.
    pub fn signature(&self) -> &SignatureBytes {
        &self.signature
    }

    /// Cached header digest.
    pub fn header_hash(&self) -> &Hash {
        &self.header_hash
    }
}

impl ContentDigest for Request {
    fn content_digest(&self) -> Hash {
        self.header_hash
    }
}

// =============================================================================
// CLUSTER B: RESPONSES
// =============================================================================

/// Execution metadata of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Digest of the request this answers.
    pub request_hash: Hash,
    /// Node that executed the request.
    pub node_id: NodeId,
    /// Completion time (ms since UNIX epoch).
    pub timestamp_ms: u64,
    /// Rows returned.
    pub row_count: u64,
    /// Position in the executing node's write log.
    pub log_offset: u64,
    /// Last inserted row id (writes only).
    pub last_insert_id: i64,
    /// Rows affected (writes only).
    pub affected_rows: i64,
}

/// Result body of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponsePayload {
    /// Successful execution.
    Rows {
        /// Column names.
        columns: Vec<String>,
        /// Row values as text.
        rows: Vec<Vec<String>>,
    },
    /// Failed execution. Still a complete response.
    Error {
        /// Error code.
        code: u32,
        /// Human readable message.
        message: String,
    },
}

/// Execution result attached to a tracked request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Execution metadata.
    pub header: ResponseHeader,
    /// Result body.
    pub payload: ResponsePayload,
}

impl Response {
    /// Successful response carrying rows.
    pub fn rows(
        request_hash: Hash,
        node_id: NodeId,
        timestamp_ms: u64,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            header: ResponseHeader {
                request_hash,
                node_id,
                timestamp_ms,
                row_count: rows.len() as u64,
                log_offset: 0,
                last_insert_id: 0,
                affected_rows: 0,
            },
            payload: ResponsePayload::Rows { columns, rows },
        }
    }

    /// Error-carrying response.
    pub fn error(
        request_hash: Hash,
        node_id: NodeId,
        timestamp_ms: u64,
        code: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            header: ResponseHeader {
                request_hash,
                node_id,
                timestamp_ms,
                row_count: 0,
                log_offset: 0,
                last_insert_id: 0,
                affected_rows: 0,
            },
            payload: ResponsePayload::Error {
                code,
                message: message.into(),
            },
        }
    }

    /// Returns true if execution failed.
    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error { .. })
    }
}
