//! In-memory ERC-20 token.
//!
//! Implements [`FungibleToken`] with configurable failure behavior and an
//! optional transfer hook that runs before balances move, the way
//! callback-bearing tokens hand control to external code mid-transfer.

use crate::domain::value_objects::{Address, U256};
use crate::errors::TokenError;
use crate::ports::outbound::FungibleToken;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// How the token reports failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenBehavior {
    /// Reverts on failure, returns `true` on success.
    #[default]
    Standard,
    /// Returns `false` instead of reverting on failure.
    FalseOnFailure,
    /// Never moves funds and always returns `false`.
    AlwaysFalse,
    /// Reverts every transfer.
    Paused,
}

/// Which entry point a hooked transfer came through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    /// `transfer`
    Transfer,
    /// `transferFrom`
    TransferFrom,
}

/// Arguments of a transfer, as seen by a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferCall {
    /// Entry point.
    pub kind: TransferKind,
    /// Account debited.
    pub from: Address,
    /// Account credited.
    pub to: Address,
    /// Amount.
    pub amount: U256,
}

/// Callback run at the start of every transfer.
pub type TransferHook = Arc<dyn Fn(TransferCall) + Send + Sync>;

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

/// In-memory token for testing and local runs.
pub struct InMemoryToken {
    address: Address,
    ledger: Mutex<Ledger>,
    behavior: RwLock<TokenBehavior>,
    hook: RwLock<Option<TransferHook>>,
}

impl InMemoryToken {
    /// Deploys an empty token at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            ledger: Mutex::new(Ledger::default()),
            behavior: RwLock::new(TokenBehavior::Standard),
            hook: RwLock::new(None),
        }
    }

    /// Credits `amount` to `owner` out of thin air.
    pub fn mint(&self, owner: Address, amount: U256) {
        let mut ledger = self.ledger.lock();
        let balance = ledger.balances.entry(owner).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    pub fn approve(&self, owner: Address, spender: Address, amount: U256) {
        self.ledger
            .lock()
            .allowances
            .insert((owner, spender), amount);
    }

    /// Changes failure behavior.
    pub fn set_behavior(&self, behavior: TokenBehavior) {
        *self.behavior.write() = behavior;
    }

    /// Installs a hook run at the start of every transfer.
    pub fn set_transfer_hook(&self, hook: TransferHook) {
        *self.hook.write() = Some(hook);
    }

    /// Removes the transfer hook.
    pub fn clear_transfer_hook(&self) {
        *self.hook.write() = None;
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.ledger
            .lock()
            .balances
            .values()
            .fold(U256::zero(), |acc, b| acc.saturating_add(*b))
    }

    fn run_hook(&self, call: TransferCall) {
        // Clone out so the hook may reinstall or clear itself.
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            hook(call);
        }
    }

    fn settle(&self, outcome: Result<(), TokenError>) -> Result<bool, TokenError> {
        match (outcome, *self.behavior.read()) {
            (Ok(()), _) => Ok(true),
            (Err(_), TokenBehavior::FalseOnFailure) => Ok(false),
            (Err(e), _) => Err(e),
        }
    }

    fn gate(&self) -> Option<Result<bool, TokenError>> {
        match *self.behavior.read() {
            TokenBehavior::AlwaysFalse => Some(Ok(false)),
            TokenBehavior::Paused => Some(Err(TokenError::Reverted("paused".into()))),
            _ => None,
        }
    }
}

impl Ledger {
    fn balance(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn move_funds(&mut self, from: Address, to: Address, amount: U256) -> Result<(), TokenError> {
        let available = self.balance(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(from, available - amount);
        let credited = self.balance(to).saturating_add(amount);
        self.balances.insert(to, credited);
        Ok(())
    }
}

impl FungibleToken for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.ledger.lock().balance(owner)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger
            .lock()
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&self, sender: Address, to: Address, amount: U256) -> Result<bool, TokenError> {
        self.run_hook(TransferCall {
            kind: TransferKind::Transfer,
            from: sender,
            to,
            amount,
        });
        if let Some(result) = self.gate() {
            return result;
        }

        trace!(token = %self.address, from = %sender, %to, %amount, "transfer");
        let outcome = self.ledger.lock().move_funds(sender, to, amount);
        self.settle(outcome)
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, TokenError> {
        self.run_hook(TransferCall {
            kind: TransferKind::TransferFrom,
            from,
            to,
            amount,
        });
        if let Some(result) = self.gate() {
            return result;
        }

        trace!(token = %self.address, %spender, %from, %to, %amount, "transferFrom");
        let outcome = {
            let mut ledger = self.ledger.lock();
            let allowed = ledger
                .allowances
                .get(&(from, spender))
                .copied()
                .unwrap_or_default();
            if allowed < amount {
                Err(TokenError::InsufficientAllowance {
                    required: amount,
                    available: allowed,
                })
            } else {
                ledger.move_funds(from, to, amount).map(|()| {
                    // Infinite approvals are not decremented.
                    if allowed != U256::MAX {
                        ledger.allowances.insert((from, spender), allowed - amount);
                    }
                })
            }
        };
        self.settle(outcome)
    }
}
