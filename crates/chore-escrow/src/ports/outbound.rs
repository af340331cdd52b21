//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry depends on:
//! - Fungible-token contracts and the directory that resolves them
//! - A time source
//! - An event sink
//!
//! Dependencies point INWARD: adapters implement these traits.

use crate::domain::value_objects::{Address, Timestamp, U256};
use crate::errors::TokenError;
use crate::events::EmittedEvent;
use std::sync::Arc;

// =============================================================================
// FUNGIBLE TOKEN
// =============================================================================

/// An ERC-20 style token contract.
///
/// ## Failure reporting
///
/// A conforming token reports failure by returning `Err` (a revert). Some
/// tokens instead return `Ok(false)`. Callers must treat both the same way;
/// [`crate::adapters::TokenCustody`] does.
///
/// Implementations may call back into the registry from inside `transfer` or
/// `transfer_from`. The registry's reentrancy guard rejects such calls when
/// they try to change state.
pub trait FungibleToken: Send + Sync {
    /// Contract address of this token.
    fn address(&self) -> Address;

    /// Balance held by `owner`.
    fn balance_of(&self, owner: Address) -> U256;

    /// Amount `spender` may still pull from `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Moves `amount` from `sender` (the calling account) to `to`.
    fn transfer(&self, sender: Address, to: Address, amount: U256) -> Result<bool, TokenError>;

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, TokenError>;
}

// =============================================================================
// TOKEN DIRECTORY
// =============================================================================

/// Resolves a token identifier to the contract deployed there.
pub trait TokenDirectory: Send + Sync {
    /// The token at `address`, or `None` if nothing is deployed there.
    fn resolve(&self, address: Address) -> Option<Arc<dyn FungibleToken>>;
}

impl<T: TokenDirectory + ?Sized> TokenDirectory for Arc<T> {
    fn resolve(&self, address: Address) -> Option<Arc<dyn FungibleToken>> {
        (**self).resolve(address)
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Time source for `created_at` / `updated_at`.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receives every event the registry emits, in emission order.
///
/// Emission is infallible: a sink that cannot deliver must drop the event
/// rather than fail the committed transition.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: &EmittedEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: &EmittedEvent) {
        (**self).emit(event);
    }
}

/// Fan-out to two sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&self, event: &EmittedEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
