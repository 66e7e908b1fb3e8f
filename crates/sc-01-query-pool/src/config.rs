//! Configuration for the query pool subsystem

use serde::Deserialize;
use shared_crypto::{Network, SignatureConfig};

/// Default cap on queries per produced block.
pub const DEFAULT_MAX_BLOCK_QUERIES: usize = 1024;

/// Default time a tracker may stay without a response (ms).
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 30_000;

/// Runtime configuration for the query pool
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum queries taken into one block
    pub max_block_queries: usize,

    /// Trackers not ready after this long are reported as stale
    pub ready_timeout_ms: u64,

    /// Accept every request signature. Test networks only.
    pub bypass_signature: bool,

    /// Derive test network addresses for signees
    pub testnet: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_block_queries: DEFAULT_MAX_BLOCK_QUERIES,
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            bypass_signature: false,
            testnet: false,
        }
    }
}

impl PoolConfig {
    /// Signature engine settings derived from this configuration.
    pub fn signature_config(&self) -> SignatureConfig {
        SignatureConfig {
            bypass: self.bypass_signature,
        }
    }

    /// Network used when rendering signee addresses.
    pub fn network(&self) -> Network {
        if self.testnet {
            Network::TestNet
        } else {
            Network::MainNet
        }
    }
}
