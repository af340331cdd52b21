//! # Chore Escrow Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Shared registry/token setup
//! └── integration/
//!     ├── lifecycle.rs   # End-to-end scenarios, conservation
//!     ├── attacks.rs     # Reentrant and misbehaving tokens
//!     └── event_stream.rs# Event ordering, logs, broadcast delivery
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p chore-tests
//!
//! # By category
//! cargo test -p chore-tests integration::lifecycle
//! cargo test -p chore-tests integration::attacks
//!
//! # Benchmarks
//! cargo bench -p chore-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
