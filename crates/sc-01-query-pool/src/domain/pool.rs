//! # Sequence Pool - Ordered Tracker Registry with Prefix Truncation
//!
//! ## Data Structures
//!
//! - `queries`: trackers in append order, each stored with its sequence
//! - `index`: O(1) lookup from sequence to current position in `queries`
//!
//! ## Invariants Enforced
//!
//! - INVARIANT-A: every key in `index` maps to a live position in `queries`
//! - INVARIANT-B: sequences strictly increase across the pool's lifetime
//!   (checked in `enqueue()`, survives truncation)
//! - INVARIANT-C: after `truncate(s)` no key `<= s` remains and every
//!   surviving position is shifted down by `pos(s) + 1`
//!
//! ## Concurrency
//!
//! `SequencePool` is not internally synchronized. It must have a single owner
//! for mutation; see `QueryPoolService` for the coarse-lock wrapper.
//! Trackers carry their own locks and may be shared freely.

use super::errors::PoolError;
use super::tracker::{QueryTracker, Timestamp};
use super::value_objects::{CommittedQuery, PoolStatus, QueryBlock};
use shared_types::{ContentDigest, SequenceNumber};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

/// Capacity kept after truncation even when the pool drains.
const MIN_RETAINED_CAPACITY: usize = 64;

/// Ordered registry of in-flight query trackers keyed by chain sequence.
#[derive(Debug, Default)]
pub struct SequencePool {
    /// Live trackers in append order.
    queries: VecDeque<(SequenceNumber, Arc<QueryTracker>)>,

    /// Sequence to position in `queries`.
    index: HashMap<SequenceNumber, usize>,

    /// Highest sequence ever enqueued, kept across truncation.
    last_enqueued: Option<SequenceNumber>,
}

impl SequencePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tracked queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true if no query is tracked.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Current position of `seq`, if tracked.
    pub fn position(&self, seq: SequenceNumber) -> Option<usize> {
        self.index.get(&seq).copied()
    }

    /// Tracker stored under `seq`, if tracked.
    pub fn get(&self, seq: SequenceNumber) -> Option<&Arc<QueryTracker>> {
        self.position(seq).map(|pos| &self.queries[pos].1)
    }

    /// Sequence at the head of the pool.
    pub fn first_sequence(&self) -> Option<SequenceNumber> {
        self.queries.front().map(|(seq, _)| *seq)
    }

    /// Sequence at the tail of the pool.
    pub fn last_sequence(&self) -> Option<SequenceNumber> {
        self.queries.back().map(|(seq, _)| *seq)
    }

    /// Highest sequence ever enqueued, including truncated ones.
    pub fn last_enqueued(&self) -> Option<SequenceNumber> {
        self.last_enqueued
    }

    /// Iterates tracked queries in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (SequenceNumber, &Arc<QueryTracker>)> + '_ {
        self.queries.iter().map(|(seq, tracker)| (*seq, tracker))
    }

    /// Appends `tracker` as the new tail under `seq`.
    ///
    /// # Errors
    /// - `DuplicateSequence` if `seq` is already tracked
    /// - `SequenceOutOfOrder` if `seq` is not above every sequence enqueued so far
    ///
    /// The pool is unchanged on error.
    pub fn enqueue(
        &mut self,
        seq: SequenceNumber,
        tracker: Arc<QueryTracker>,
    ) -> Result<(), PoolError> {
        if self.index.contains_key(&seq) {
            warn!(seq, "[sc-01] Rejected duplicate sequence");
            return Err(PoolError::DuplicateSequence { seq });
        }
        if let Some(last) = self.last_enqueued {
            if seq <= last {
                warn!(seq, last, "[sc-01] Rejected out-of-order sequence");
                return Err(PoolError::SequenceOutOfOrder { seq, last });
            }
        }

        let pos = self.queries.len();
        self.queries.push_back((seq, tracker));
        self.index.insert(seq, pos);
        self.last_enqueued = Some(seq);

        debug!(seq, pos, "[sc-01] Enqueued query");
        Ok(())
    }

    /// Returns true iff `seq` is tracked and its request has the same content
    /// digest as `req`.
    ///
    /// A known sequence with a different digest is a conflicting request
    /// under a reused sequence; it is logged and reported as `false`.
    pub fn match_request<R>(&self, seq: SequenceNumber, req: &R) -> bool
    where
        R: ContentDigest + ?Sized,
    {
        let Some(tracker) = self.get(seq) else {
            return false;
        };

        if tracker.request().content_digest() != req.content_digest() {
            warn!(seq, "[sc-01] Request conflicts with tracked content");
            return false;
        }
        true
    }

    /// Returns true iff `seq` is tracked at the tail position.
    pub fn match_last(&self, seq: SequenceNumber) -> bool {
        matches!(self.position(seq), Some(pos) if pos + 1 == self.queries.len())
    }

    /// Drops every tracker up to and including `seq` and rebases the index.
    ///
    /// No-op if `seq` is not tracked. Returns the number of trackers removed.
    pub fn truncate(&mut self, seq: SequenceNumber) -> usize {
        let Some(pos) = self.position(seq) else {
            return 0;
        };
        let removed = pos + 1;

        // Rebuild from the surviving keys rather than decrementing in place.
        let index = std::mem::take(&mut self.index);
        self.index = index
            .into_iter()
            .filter(|&(key, _)| key > seq)
            .map(|(key, old)| (key, old - removed))
            .collect();
        self.queries.drain(..removed);
        self.release_capacity();

        debug!(
            seq,
            removed,
            remaining = self.queries.len(),
            "[sc-01] Truncated pool"
        );
        removed
    }

    /// Gives back storage left over from a burst once the live window is a
    /// quarter of the allocation.
    fn release_capacity(&mut self) {
        let len = self.queries.len();
        if self.queries.capacity() > MIN_RETAINED_CAPACITY && len < self.queries.capacity() / 4 {
            self.queries.shrink_to(MIN_RETAINED_CAPACITY.max(len.saturating_mul(2)));
        }
    }

    /// Highest sequence `s` such that every tracker from the head through `s`
    /// is ready, looking at no more than `limit` trackers.
    pub fn ready_prefix(&self, limit: usize) -> Option<SequenceNumber> {
        self.queries
            .iter()
            .take(limit)
            .take_while(|(_, tracker)| tracker.ready())
            .last()
            .map(|(seq, _)| *seq)
    }

    /// Takes the contiguous ready prefix (at most `limit` queries) out of the
    /// pool as a block and truncates through its last sequence.
    ///
    /// Returns `None` if the head of the pool is not ready.
    pub fn take_ready(&mut self, limit: usize) -> Option<QueryBlock> {
        let mut queries = Vec::new();
        for (seq, tracker) in self.queries.iter().take(limit) {
            let Some(response) = tracker.response() else {
                break;
            };
            queries.push(CommittedQuery {
                seq: *seq,
                request: Arc::clone(tracker.request()),
                response,
            });
        }

        let first_sequence = queries.first()?.seq;
        let last_sequence = queries.last()?.seq;
        self.truncate(last_sequence);

        Some(QueryBlock {
            first_sequence,
            last_sequence,
            queries,
        })
    }

    /// Sequences whose tracker has been waiting for a response for at least
    /// `timeout_ms`.
    pub fn stale_sequences(&self, now: Timestamp, timeout_ms: u64) -> Vec<SequenceNumber> {
        self.queries
            .iter()
            .filter(|(_, tracker)| {
                !tracker.ready() && now.saturating_sub(tracker.enqueued_at()) >= timeout_ms
            })
            .map(|(seq, _)| *seq)
            .collect()
    }

    /// Returns a status snapshot.
    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            in_flight: self.queries.len(),
            ready: self
                .queries
                .iter()
                .filter(|(_, tracker)| tracker.ready())
                .count(),
            first_sequence: self.first_sequence(),
            last_sequence: self.last_sequence(),
        }
    }
}
