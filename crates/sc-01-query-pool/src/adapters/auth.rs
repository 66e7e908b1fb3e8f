//! # Signature Authenticator
//!
//! `RequestAuthenticator` backed by the secp256k1 signature engine.
//!
//! Checks, in order:
//! 1. `batch_count` equals the number of queries
//! 2. `queries_hash` matches the query batch
//! 3. signee is a valid compressed public key
//! 4. signature verifies over the cached header hash
//!
//! A bypassed engine skips step 4 only.

use crate::config::PoolConfig;
use crate::domain::AuthError;
use crate::ports::RequestAuthenticator;
use shared_crypto::{
    AccountAddress, Network, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature,
    SignatureEngine,
};
use shared_types::{queries_hash, Query, Request, RequestHeader};
use tracing::warn;

/// Authenticates requests by verifying their header signature.
#[derive(Clone, Copy, Debug)]
pub struct SignatureAuthenticator {
    engine: SignatureEngine,
    network: Network,
}

impl SignatureAuthenticator {
    /// Creates an authenticator around `engine`.
    pub fn new(engine: SignatureEngine, network: Network) -> Self {
        Self { engine, network }
    }

    /// Creates an authenticator from pool configuration.
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(
            SignatureEngine::new(config.signature_config()),
            config.network(),
        )
    }

    fn check(&self, request: &Request) -> Result<AccountAddress, AuthError> {
        let header = request.header();
        let actual = request.queries().len() as u64;
        if header.batch_count != actual {
            return Err(AuthError::BatchCountMismatch {
                declared: header.batch_count,
                actual,
            });
        }
        if header.queries_hash != queries_hash(request.queries()) {
            return Err(AuthError::QueriesHashMismatch);
        }

        let signee = Secp256k1PublicKey::from_bytes(*request.signee())
            .map_err(|_| AuthError::InvalidSignee)?;
        let signature = Secp256k1Signature::from_bytes(*request.signature());
        if !self
            .engine
            .verify(request.header_hash(), &signature, &signee)
        {
            return Err(AuthError::InvalidSignature);
        }

        Ok(AccountAddress::from_public_key(&signee, self.network))
    }
}

impl RequestAuthenticator for SignatureAuthenticator {
    fn authenticate(&self, request: &Request) -> Result<AccountAddress, AuthError> {
        self.check(request).inspect_err(|err| {
            warn!(
                database = %request.header().database_id,
                seq_no = request.header().seq_no,
                error = %err,
                "[sc-01] Request failed authentication"
            );
        })
    }
}

/// Seals and signs a request.
///
/// Fills in `batch_count` and `queries_hash` from `queries`, then signs the
/// header hash with `keypair`.
pub fn sign_request(
    engine: &SignatureEngine,
    keypair: &Secp256k1KeyPair,
    mut header: RequestHeader,
    queries: Vec<Query>,
) -> Result<Request, AuthError> {
    header.batch_count = queries.len() as u64;
    header.queries_hash = queries_hash(&queries);

    let signature = engine.sign(keypair, &header.compute_hash())?;
    Ok(Request::new(
        header,
        queries,
        *keypair.public_key().as_bytes(),
        *signature.as_bytes(),
    ))
}
