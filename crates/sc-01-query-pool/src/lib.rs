//! # Sequenced Query Pool Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Buffers in-flight SQL requests between "accepted" and "committed to a
//! block". Each request is tracked under the chain-wide sequence number the
//! ordering layer assigned it, execution attaches a response asynchronously,
//! and the block producer drains the contiguous ready prefix and truncates.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-A | Index never points past the tracker sequence | `domain/pool.rs` - `enqueue()`, `truncate()` |
//! | INVARIANT-B | Sequences strictly increase | `domain/pool.rs` - `enqueue()` rejects duplicates and regressions |
//! | INVARIANT-C | Truncate drops keys `<= s`, shifts the rest by `pos(s) + 1` | `domain/pool.rs` - `truncate()` index rebuild |
//! | INVARIANT-D | `ready()` true implies a fully written response | `domain/tracker.rs` - per-tracker `RwLock` |
//!
//! ## Query Lifecycle
//!
//! ```text
//! [ACCEPTED] ──attach_response──→ [READY] ──produce_block──→ [COMMITTED, truncated]
//!     │
//!     └── ready_timeout ──fail_stale──→ [READY (error response)]
//! ```
//!
//! ## Concurrency
//!
//! - `QueryTracker`: own lock, shared as `Arc` with the execution worker
//! - `SequencePool`: no internal locking, single owner for mutation
//! - `QueryPoolService`: one coarse `RwLock` around the pool, single writer /
//!   many readers
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/auth.rs - SignatureAuthenticator, sign_request        │
//! │  service.rs       - QueryPoolService (coarse lock)              │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - QueryPoolApi trait                         │
//! │  ports/outbound.rs - RequestAuthenticator, TimeSource traits    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/tracker.rs       - QueryTracker                         │
//! │  domain/pool.rs          - SequencePool                         │
//! │  domain/value_objects.rs - QueryBlock, PoolStatus               │
//! │  domain/errors.rs        - PoolError, AuthError                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{sign_request, SignatureAuthenticator};
pub use config::PoolConfig;
pub use domain::*;
pub use ports::{QueryPoolApi, RequestAuthenticator, SystemTimeSource, TimeSource};
pub use service::{QueryPoolService, EXECUTION_TIMEOUT};
