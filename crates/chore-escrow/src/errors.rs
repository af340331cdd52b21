//! # Error Types
//!
//! All error types surfaced by the chore registry and its token adapters.
//!
//! Every `ChoreError` is a synchronous failure of the attempted operation. The
//! registry guarantees that a failed call leaves records, indices and custody
//! exactly as they were before the call.

use crate::domain::value_objects::{Address, ChoreId, U256};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoreError {
    /// Token identifier is the zero address.
    #[error("zero address")]
    ZeroAddress,

    /// Reward amount is zero.
    #[error("invalid amount: reward must be greater than zero")]
    InvalidAmount,

    /// Record is not in the status the operation requires.
    #[error("invalid status for this operation")]
    InvalidStatus,

    /// Chore was already claimed by a child (status is past Created).
    #[error("chore already accepted")]
    AlreadyAccepted,

    /// Chore already reached Approved or Rejected.
    #[error("chore already completed or rejected")]
    AlreadyCompletedOrRejected,

    /// Caller is not the chore's parent.
    #[error("caller is not the parent of this chore")]
    NotParent,

    /// Caller is not the chore's child.
    #[error("caller is not the child of this chore")]
    NotChild,

    /// Parent's allowance to the registry is below the reward.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The token transfer reverted or returned a false success flag.
    #[error("token operation failed: {0:?}")]
    SafeERC20FailedOperation(Address),

    /// A state-changing operation was entered while another was in progress.
    #[error("reentrant call")]
    ReentrancyGuardReentrantCall,

    /// No record exists for the id.
    #[error("chore not found: {0}")]
    ChoreNotFound(ChoreId),
}

impl ChoreError {
    /// ABI error name, as declared by the deployed registry contract.
    #[must_use]
    pub fn selector_name(&self) -> &'static str {
        match self {
            Self::ZeroAddress => "ZeroAddress",
            Self::InvalidAmount => "InvalidAmount",
            Self::InvalidStatus => "InvalidStatus",
            Self::AlreadyAccepted => "AlreadyAccepted",
            Self::AlreadyCompletedOrRejected => "AlreadyCompletedOrRejected",
            Self::NotParent => "NotParent",
            Self::NotChild => "NotChild",
            Self::InsufficientAllowance => "InsufficientAllowance",
            Self::SafeERC20FailedOperation(_) => "SafeERC20FailedOperation",
            Self::ReentrancyGuardReentrantCall => "ReentrancyGuardReentrantCall",
            Self::ChoreNotFound(_) => "ChoreNotFound",
        }
    }

    /// Returns true for role check failures.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, Self::NotParent | Self::NotChild)
    }

    /// Returns true for lifecycle precondition failures.
    #[must_use]
    pub fn is_status_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidStatus | Self::AlreadyAccepted | Self::AlreadyCompletedOrRejected
        )
    }

    /// Returns true for failures raised by the token custody adapter.
    #[must_use]
    pub fn is_custody_failure(&self) -> bool {
        matches!(
            self,
            Self::InsufficientAllowance | Self::SafeERC20FailedOperation(_)
        )
    }
}

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Failures reported by a fungible-token contract (a revert).
///
/// These never reach registry callers directly; the custody adapter folds them
/// into [`ChoreError::SafeERC20FailedOperation`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Sender balance below the transfer amount.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Spender allowance below the transfer amount.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// No token contract is deployed at the address.
    #[error("no token contract at {0:?}")]
    UnknownToken(Address),

    /// The token reverted for another reason.
    #[error("token reverted: {0}")]
    Reverted(String),
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors loading a [`crate::service::RegistryConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An address variable is not 20 bytes of hex.
    #[error("invalid address in {var}: {value}")]
    InvalidAddress {
        /// Environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric variable failed to parse.
    #[error("invalid number in {var}: {value}")]
    InvalidNumber {
        /// Environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
