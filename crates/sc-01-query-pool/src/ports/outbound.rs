//! Outbound (Driven) ports for the Query Pool subsystem.
//!
//! These traits define dependencies on external systems that the pool
//! service needs for operation.

use crate::domain::{AuthError, Timestamp};
use shared_crypto::AccountAddress;
use shared_types::Request;

/// Verifies a request's sender before it may be enqueued.
///
/// Implemented by the authenticated connection layer. The pool itself
/// performs no authentication.
pub trait RequestAuthenticator: Send + Sync {
    /// Checks the request and returns the signee's account address.
    ///
    /// # Errors
    /// Any `AuthError`; the request must then be dropped.
    fn authenticate(&self, request: &Request) -> Result<AccountAddress, AuthError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Mock time source for testing.
#[cfg(test)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
