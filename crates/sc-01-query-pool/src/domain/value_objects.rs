//! Value objects handed out by the query pool.

use shared_types::{Request, Response, SequenceNumber};
use std::sync::Arc;

/// A finished query taken out of the pool for a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedQuery {
    /// Chain sequence of the query.
    pub seq: SequenceNumber,
    /// The tracked request.
    pub request: Arc<Request>,
    /// The response that made it ready.
    pub response: Response,
}

/// A contiguous run of ready queries, in sequence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryBlock {
    /// First sequence in the block.
    pub first_sequence: SequenceNumber,
    /// Last sequence in the block. The pool was truncated through it.
    pub last_sequence: SequenceNumber,
    /// Queries in sequence order.
    pub queries: Vec<CommittedQuery>,
}

impl QueryBlock {
    /// Number of queries in the block.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Always false for blocks produced by the pool.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Pool status snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStatus {
    /// Trackers awaiting block inclusion.
    pub in_flight: usize,
    /// Trackers with a response attached.
    pub ready: usize,
    /// Sequence at the head of the pool.
    pub first_sequence: Option<SequenceNumber>,
    /// Sequence at the tail of the pool.
    pub last_sequence: Option<SequenceNumber>,
}
