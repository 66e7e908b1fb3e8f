//! Adapters layer for Query Pool subsystem.
//!
//! Implements outbound ports against concrete collaborators:
//! - `auth`: signature-backed `RequestAuthenticator`

pub mod auth;

pub use auth::*;
