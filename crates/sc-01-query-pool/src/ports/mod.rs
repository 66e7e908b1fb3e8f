//! Ports layer for Query Pool subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API used by the execution engine and block producer
//! - Outbound (Driven) ports: Request authentication and time

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
