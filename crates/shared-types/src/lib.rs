//! # Shared Types Crate
//!
//! Request and response entities exchanged between the connection layer,
//! the execution engine, the query pool and the block producer.
//!
//! ## Design Principles
//!
//! - **Immutable requests**: a `Request` is sealed at construction and its
//!   header digest is cached, so equality checks never rehash.
//! - **Opaque responses**: the pool only cares whether a `Response` exists;
//!   execution failures are responses too.

pub mod entities;

pub use entities::*;
