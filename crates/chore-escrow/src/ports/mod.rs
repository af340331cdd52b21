//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the chore registry.
//!
//! - **Driving Ports (Inbound)**: `ChoreRegistryApi`
//! - **Driven Ports (Outbound)**: `FungibleToken`, `TokenDirectory`, `Clock`,
//!   `EventSink`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
