//! # Inbound Port - QueryPoolApi
//!
//! Primary driving port exposing the query pool.
//!
//! ## Callers
//!
//! | Method | Caller |
//! |--------|--------|
//! | `accept` | Connection layer, after ordering assigns a sequence |
//! | `attach_response` | Execution workers |
//! | `match_request` / `match_last` | Ordering layer, block producer |
//! | `produce_block` | Block producer (single authority) |

use crate::domain::{PoolError, PoolStatus, QueryBlock, QueryTracker};
use shared_types::{Request, Response, SequenceNumber};
use std::sync::Arc;

/// Primary API for the Query Pool subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use sc_01_query_pool::ports::QueryPoolApi;
///
/// fn example(pool: &impl QueryPoolApi, seq: u64, request: Request, response: Response) {
///     let tracker = pool.accept(seq, request)?;
///
///     // execution finishes on some worker
///     pool.attach_response(seq, response)?;
///
///     // block producer drains the ready prefix
///     if let Some(block) = pool.produce_block(256) {
///         commit(block);
///     }
/// }
/// ```
pub trait QueryPoolApi: Send + Sync {
    /// Authenticates `request` and tracks it under `seq`.
    ///
    /// # Errors
    /// - `Authentication`: request failed authentication
    /// - `DuplicateSequence`: `seq` already tracked
    /// - `SequenceOutOfOrder`: `seq` does not extend the pool
    fn accept(
        &self,
        seq: SequenceNumber,
        request: Request,
    ) -> Result<Arc<QueryTracker>, PoolError>;

    /// Attaches the execution result of `seq`. Last write wins.
    ///
    /// # Errors
    /// - `UnknownSequence`: `seq` not tracked (never accepted or already committed)
    fn attach_response(&self, seq: SequenceNumber, response: Response) -> Result<(), PoolError>;

    /// Returns true iff `seq` is tracked with content identical to `request`.
    fn match_request(&self, seq: SequenceNumber, request: &Request) -> bool;

    /// Returns true iff `seq` is the most recently appended entry.
    fn match_last(&self, seq: SequenceNumber) -> bool;

    /// Takes the contiguous ready prefix (at most `max_queries`) as a block
    /// and truncates the pool through it. `None` if the head is not ready.
    fn produce_block(&self, max_queries: usize) -> Option<QueryBlock>;

    /// Returns a status snapshot.
    fn status(&self) -> PoolStatus;
}
