//! # Chore Escrow - Token-Custodied Task Registry
//!
//! A ledger that holds a fungible-token reward on behalf of a parent until a
//! child completes a task, gated by role checks and protected against
//! reentrant fund movement.
//!
//! ## Lifecycle
//!
//! ```text
//! Created ──accept──→ Accepted ──submit──→ Submitted ──approve──→ Approved
//!                                               └──────reject───→ Rejected
//! ```
//!
//! | Operation | Role | Custody | Events |
//! |-----------|------|---------|--------|
//! | `create_chore` | any (becomes parent) | pull reward from parent | `ChoreCreated` |
//! | `accept_chore` | any (becomes child) | - | `ChoreAccepted` |
//! | `submit_proof` | child | - | `ChoreSubmitted` |
//! | `approve_chore` | parent | push reward to child | `ChoreApproved` |
//! | `reject_chore` | parent | push reward to parent | `ChoreRejected`, `ChoreRefunded` |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Non-terminal records are fully funded | `domain/invariants.rs` - `check_funding_invariant()` |
//! | Child set exactly from Accepted on | `domain/invariants.rs` - `check_child_invariant()` |
//! | Proof set exactly from Submitted on | `domain/invariants.rs` - `check_proof_invariant()` |
//! | `updated_at` never decreases | `domain/state_machine.rs` - `advance()` |
//! | Failed calls change nothing | `service.rs` - transition on a copy, commit last |
//! | No reentrant mutation | `guard.rs` - `ReentrancyGuard` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `FungibleToken` | ERC-20 style `transfer` / `transferFrom` / `allowance` |
//! | `TokenDirectory` | Resolve a token address to its contract |
//! | `Clock` | Record timestamps |
//! | `EventSink` | Deliver emitted events |
//!
//! ## Usage Example
//!
//! ```
//! use chore_escrow::prelude::*;
//!
//! let harness = create_test_registry();
//! let token = harness.deploy_token(Address::repeat(0x70));
//! let parent = Address::repeat(0x11);
//! let child = Address::repeat(0x22);
//! harness.fund(&token, parent, U256::from(100));
//!
//! let registry = &harness.registry;
//! let id = registry
//!     .create_chore(parent, "Dishes", "Wash all dishes", U256::from(100), token.address())
//!     .unwrap();
//! registry.accept_chore(child, id).unwrap();
//! registry.submit_proof(child, id, "ipfs://proof").unwrap();
//! registry.approve_chore(parent, id).unwrap();
//!
//! assert_eq!(token.balance_of(child), U256::from(100));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_panics_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Chore, ChoreStatus, ChoreTuple, Log, NewChore};

    // Value objects
    pub use crate::domain::value_objects::{Address, ChoreId, Hash, Timestamp, U256};

    // Domain services
    pub use crate::domain::access::Role;
    pub use crate::domain::services::{event_topic, keccak256};

    // Invariants
    pub use crate::domain::invariants::{
        check_chore_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::ChoreRegistryApi;
    pub use crate::ports::outbound::{Clock, EventSink, FungibleToken, TokenDirectory};

    // Events
    pub use crate::events::{signatures, ChoreEvent, EmittedEvent};

    // Errors
    pub use crate::errors::{ChoreError, ConfigError, TokenError};

    // Guard
    pub use crate::guard::ReentrancyGuard;

    // Adapters
    pub use crate::adapters::{
        BroadcastEventSink, InMemoryEventLog, InMemoryToken, InMemoryTokenDirectory,
        ManualClock, SystemClock, TokenBehavior, TokenCustody,
    };

    // Service
    pub use crate::service::{
        create_test_registry, create_test_registry_with, ChoreRegistry, InMemoryRegistry,
        RegistryConfig, RegistryStats, TestRegistry,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component name used in log fields.
pub const COMPONENT_NAME: &str = "chore-escrow";

// =============================================================================
// TESTS
// =============================================================================
