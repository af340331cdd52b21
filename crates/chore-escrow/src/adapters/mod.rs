//! # Adapters Layer (Outer Hexagon)
//!
//! In-process implementations of the outbound ports.
//!
//! - `erc20`: in-memory fungible token with failure modes and transfer hooks
//! - `token_directory`: address to token resolution
//! - `custody`: safe-transfer wrapper used by the registry
//! - `clock`: system and manual clocks
//! - `event_log`: in-memory history and broadcast stream

pub mod clock;
pub mod custody;
pub mod erc20;
pub mod event_log;
pub mod token_directory;

pub use clock::{ManualClock, SystemClock};
pub use custody::TokenCustody;
pub use erc20::{InMemoryToken, TokenBehavior, TransferCall, TransferHook, TransferKind};
pub use event_log::{BroadcastEventSink, InMemoryEventLog, DEFAULT_CHANNEL_CAPACITY};
pub use token_directory::InMemoryTokenDirectory;
