//! # SQL-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── pool_benchmarks.rs   # enqueue / truncate / block production
//! │
//! └── src/integration/         # Signed requests through the pool service
//!     ├── mod.rs               # Shared fixtures, log setup
//!     └── flows.rs             # Multi-threaded accept/execute/produce
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # With pool logging
//! RUST_LOG=sc_01_query_pool=debug cargo test -p sc-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p sc-tests
//! ```

pub mod integration;
