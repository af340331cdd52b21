//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the chore escrow.
//! NO I/O, NO locks, NO token calls.
//!
//! - Dependencies point INWARD only (adapters and the service depend on this).
//! - Records are mutated only through the transition methods in
//!   `state_machine`; callers work on a copy and commit it afterwards.

pub mod access;
pub mod entities;
pub mod invariants;
pub mod services;
pub mod state_machine;
pub mod value_objects;

pub use access::*;
pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
