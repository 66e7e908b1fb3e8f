//! Query Pool Service
//!
//! Wraps the single-owner `SequencePool` in one coarse `RwLock`:
//!
//! | Operation | Pool lock |
//! |-----------|-----------|
//! | `accept`, `produce_block`, `truncate` | write |
//! | `match_request`, `match_last`, `status`, `ready_prefix` | read |
//! | `attach_response`, `fail_stale` | read (lookup only), then the tracker's own lock |
//!
//! Authentication runs before the pool lock is taken.

use crate::{
    config::PoolConfig,
    domain::{PoolError, PoolStatus, QueryBlock, QueryTracker, SequencePool},
    ports::{QueryPoolApi, RequestAuthenticator, SystemTimeSource, TimeSource},
};
use parking_lot::RwLock;
use shared_types::{ContentDigest, NodeId, Request, Response, SequenceNumber};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Error code of responses attached by the liveness policy.
pub const EXECUTION_TIMEOUT: u32 = 408;

/// Concrete implementation of QueryPoolApi
pub struct QueryPoolService {
    /// Pool configuration
    config: PoolConfig,

    /// Identity stamped on responses this node attaches itself
    node_id: NodeId,

    /// Tracked queries
    pool: RwLock<SequencePool>,

    /// Connection layer check run before enqueue
    authenticator: Arc<dyn RequestAuthenticator>,

    /// Clock for acceptance stamps and staleness
    time_source: Arc<dyn TimeSource>,
}

impl QueryPoolService {
    /// Create a new query pool service
    pub fn new(
        config: PoolConfig,
        node_id: NodeId,
        authenticator: Arc<dyn RequestAuthenticator>,
    ) -> Self {
        info!(
            max_block_queries = config.max_block_queries,
            ready_timeout_ms = config.ready_timeout_ms,
            bypass_signature = config.bypass_signature,
            "[sc-01] Initializing Query Pool Service"
        );
        if config.bypass_signature {
            warn!("[sc-01] Signature verification is bypassed");
        }

        Self {
            config,
            node_id,
            pool: RwLock::new(SequencePool::new()),
            authenticator,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    /// Replace the clock
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Tracker handle for `seq`, if tracked
    pub fn tracker(&self, seq: SequenceNumber) -> Option<Arc<QueryTracker>> {
        self.pool.read().get(seq).cloned()
    }

    /// Last sequence of the ready prefix within one block's worth of queries
    pub fn ready_prefix(&self) -> Option<SequenceNumber> {
        self.pool.read().ready_prefix(self.config.max_block_queries)
    }

    /// Drop everything through `seq` without building a block
    pub fn truncate(&self, seq: SequenceNumber) -> usize {
        self.pool.write().truncate(seq)
    }

    /// Sequences not ready within `ready_timeout_ms`
    pub fn stale_sequences(&self) -> Vec<SequenceNumber> {
        let now = self.time_source.now();
        self.pool
            .read()
            .stale_sequences(now, self.config.ready_timeout_ms)
    }

    /// Attach an `EXECUTION_TIMEOUT` error response to every stale tracker
    /// so the ready prefix can advance. Trackers that got a response in the
    /// meantime keep it. Returns the number of trackers failed.
    pub fn fail_stale(&self) -> usize {
        let now = self.time_source.now();
        let stale: Vec<(SequenceNumber, Arc<QueryTracker>)> = {
            let pool = self.pool.read();
            pool.stale_sequences(now, self.config.ready_timeout_ms)
                .into_iter()
                .filter_map(|seq| pool.get(seq).map(|tracker| (seq, Arc::clone(tracker))))
                .collect()
        };

        let mut failed = 0;
        for (seq, tracker) in stale {
            let response = Response::error(
                tracker.request().content_digest(),
                self.node_id,
                now,
                EXECUTION_TIMEOUT,
                "execution timed out",
            );
            if tracker.update_resp_if_absent(response) {
                warn!(
                    seq,
                    waited_ms = now.saturating_sub(tracker.enqueued_at()),
                    "[sc-01] Failed stale query"
                );
                failed += 1;
            }
        }
        failed
    }
}

impl QueryPoolApi for QueryPoolService {
    fn accept(
        &self,
        seq: SequenceNumber,
        request: Request,
    ) -> Result<Arc<QueryTracker>, PoolError> {
        let sender = self.authenticator.authenticate(&request)?;

        let tracker = Arc::new(QueryTracker::with_timestamp(
            request,
            self.time_source.now(),
        ));
        self.pool.write().enqueue(seq, Arc::clone(&tracker))?;

        debug!(seq, sender = %sender, "[sc-01] Accepted request");
        Ok(tracker)
    }

    fn attach_response(&self, seq: SequenceNumber, response: Response) -> Result<(), PoolError> {
        let tracker = self
            .pool
            .read()
            .get(seq)
            .cloned()
            .ok_or(PoolError::UnknownSequence { seq })?;
        tracker.update_resp(response);
        Ok(())
    }

    fn match_request(&self, seq: SequenceNumber, request: &Request) -> bool {
        self.pool.read().match_request(seq, request)
    }

    fn match_last(&self, seq: SequenceNumber) -> bool {
        self.pool.read().match_last(seq)
    }

    fn produce_block(&self, max_queries: usize) -> Option<QueryBlock> {
        let limit = max_queries.min(self.config.max_block_queries);
        let block = self.pool.write().take_ready(limit)?;

        info!(
            first = block.first_sequence,
            last = block.last_sequence,
            queries = block.len(),
            "[sc-01] Produced query block"
        );
        Some(block)
    }

    fn status(&self) -> PoolStatus {
        self.pool.read().status()
    }
}
