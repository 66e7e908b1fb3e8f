//! # Integration Fixtures
//!
//! Shared setup for flows that drive signed requests through
//! `QueryPoolService`: a client that signs request batches, a manual clock,
//! and an executor stand-in that answers requests.

pub mod flows;

use sc_01_query_pool::{
    sign_request, PoolConfig, QueryPoolService, SignatureAuthenticator, TimeSource, Timestamp,
};
use shared_crypto::{Secp256k1KeyPair, SignatureEngine};
use shared_types::{ContentDigest, NodeId, Query, QueryType, Request, RequestHeader, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Clock advanced by hand.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// A database client signing its own request batches.
pub struct Client {
    keypair: Secp256k1KeyPair,
    engine: SignatureEngine,
    node_id: NodeId,
    database_id: String,
    connection_id: u64,
}

impl Client {
    pub fn new(config: &PoolConfig, database_id: &str, connection_id: u64) -> Self {
        Self {
            keypair: Secp256k1KeyPair::generate(),
            engine: SignatureEngine::new(config.signature_config()),
            node_id: NodeId([connection_id as u8; 32]),
            database_id: database_id.to_string(),
            connection_id,
        }
    }

    /// Signed write request carrying one statement.
    pub fn write(&self, seq_no: u64, sql: &str) -> Request {
        self.request(QueryType::Write, seq_no, vec![Query::new(sql)])
    }

    /// Signed request for an arbitrary batch.
    pub fn request(&self, query_type: QueryType, seq_no: u64, queries: Vec<Query>) -> Request {
        let header = RequestHeader {
            query_type,
            node_id: self.node_id,
            database_id: self.database_id.clone(),
            connection_id: self.connection_id,
            seq_no,
            timestamp_ms: 1_700_000_000_000 + seq_no,
            batch_count: 0,
            queries_hash: [0; 32],
        };
        sign_request(&self.engine, &self.keypair, header, queries)
            .unwrap_or_else(|err| panic!("signing failed: {err}"))
    }
}

/// Response an executing node would attach for `request`.
pub fn executed(request: &Request, executor: NodeId, at: Timestamp) -> Response {
    Response::rows(
        request.content_digest(),
        executor,
        at,
        vec!["affected".into()],
        vec![vec![request.header().seq_no.to_string()]],
    )
}

/// Pool service authenticating with `config` and reading `clock`.
pub fn service(config: PoolConfig, clock: Arc<ManualClock>) -> Arc<QueryPoolService> {
    init_logging();
    let authenticator = Arc::new(SignatureAuthenticator::from_config(&config));
    Arc::new(
        QueryPoolService::new(config, NodeId([0xA0; 32]), authenticator).with_time_source(clock),
    )
}
