//! Token custody.
//!
//! Moves rewards between accounts and the registry's own account using the
//! safe-transfer discipline: a token call counts as successful only if it
//! neither reverts nor returns `false`. Each call is all-or-nothing.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{ChoreError, TokenError};
use crate::ports::outbound::{FungibleToken, TokenDirectory};
use std::sync::Arc;
use tracing::debug;

/// Custody account of the registry over a set of tokens.
pub struct TokenCustody<D> {
    directory: D,
    custodian: Address,
}

impl<D: TokenDirectory> TokenCustody<D> {
    /// Custody held by `custodian` over tokens resolved through `directory`.
    pub fn new(directory: D, custodian: Address) -> Self {
        Self {
            directory,
            custodian,
        }
    }

    /// Pulls `amount` of `token` from `from` into custody.
    ///
    /// # Errors
    ///
    /// - `InsufficientAllowance` if `from` has not approved the custodian for
    ///   at least `amount`
    /// - `SafeERC20FailedOperation` if the token is unknown, reverts, or
    ///   returns `false`
    pub fn pull(&self, token: Address, from: Address, amount: U256) -> Result<(), ChoreError> {
        let contract = self.contract(token)?;

        let allowance = contract.allowance(from, self.custodian);
        if allowance < amount {
            debug!(%token, %from, %amount, %allowance, "allowance below reward");
            return Err(ChoreError::InsufficientAllowance);
        }

        let outcome = contract.transfer_from(self.custodian, from, self.custodian, amount);
        Self::check(token, outcome)
    }

    /// Pays `amount` of `token` out of custody to `to`.
    ///
    /// # Errors
    ///
    /// `SafeERC20FailedOperation` if the token is unknown, reverts, or
    /// returns `false`.
    pub fn push(&self, token: Address, to: Address, amount: U256) -> Result<(), ChoreError> {
        let contract = self.contract(token)?;
        let outcome = contract.transfer(self.custodian, to, amount);
        Self::check(token, outcome)
    }

    fn contract(&self, token: Address) -> Result<Arc<dyn FungibleToken>, ChoreError> {
        self.directory.resolve(token).ok_or_else(|| {
            debug!(%token, "{}", TokenError::UnknownToken(token));
            ChoreError::SafeERC20FailedOperation(token)
        })
    }

    fn check(token: Address, outcome: Result<bool, TokenError>) -> Result<(), ChoreError> {
        match outcome {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!(%token, "token returned false");
                Err(ChoreError::SafeERC20FailedOperation(token))
            }
            Err(e) => {
                debug!(%token, error = %e, "token call reverted");
                Err(ChoreError::SafeERC20FailedOperation(token))
            }
        }
    }
}
