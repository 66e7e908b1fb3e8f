//! # Domain Layer - Query Pool Subsystem
//!
//! Pure data-structure logic; no I/O and no clocks.
//!
//! ## Components
//!
//! - `tracker`: QueryTracker, the per-request lockable response cell
//! - `pool`: SequencePool with append, match and prefix truncation
//! - `value_objects`: QueryBlock, CommittedQuery, PoolStatus
//! - `errors`: PoolError, AuthError

pub mod errors;
pub mod pool;
pub mod tracker;
pub mod value_objects;

pub use errors::*;
pub use pool::*;
pub use tracker::*;
pub use value_objects::*;
