//! # Chore Telemetry
//!
//! Structured logging for the chore escrow registry, built on `tracing` and
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chore_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CHORE_SERVICE_NAME` | `chore-escrow` | Service name |
//! | `CHORE_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `CHORE_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CHORE_JSON_LOGS` | `false` | JSON formatted logs |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use logging::{build_filter, init_logging, init_test_logging};

#[doc(hidden)]
pub use tracing as __tracing;

use thiserror::Error;

/// Value of the `component` field added by [`log_chore_event!`].
pub const COMPONENT: &str = "chore-escrow";

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The filter directive string does not parse.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialized(String),
}
