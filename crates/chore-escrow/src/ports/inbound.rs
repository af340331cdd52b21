//! # Driving Ports (API - Inbound)
//!
//! The public operation set of the chore registry. Dashboards, wallets and
//! indexers drive the registry exclusively through this trait.
//!
//! Argument order and return shapes follow the deployed contract ABI, with the
//! calling account made explicit as the first argument of every state-changing
//! operation.

use crate::domain::entities::{Chore, ChoreTuple};
use crate::domain::value_objects::{Address, ChoreId, U256};
use crate::errors::ChoreError;

/// Primary API of the chore registry.
///
/// ## Mutating operations
///
/// Run to completion or fail with nothing changed. A call made while another
/// mutating call is still in progress on the same thread (e.g. from a token
/// callback) fails with `ReentrancyGuardReentrantCall`.
///
/// ## Read operations
///
/// Never take the reentrancy guard and never check roles. They observe the
/// last committed state.
pub trait ChoreRegistryApi: Send + Sync {
    /// Post a chore and pull `reward` units of `token` from `caller` into
    /// custody. `caller` becomes the parent.
    ///
    /// # Errors
    ///
    /// `InvalidAmount`, `ZeroAddress`, `InsufficientAllowance`,
    /// `SafeERC20FailedOperation`, `ReentrancyGuardReentrantCall`.
    fn create_chore(
        &self,
        caller: Address,
        title: &str,
        description: &str,
        reward: U256,
        token: Address,
    ) -> Result<ChoreId, ChoreError>;

    /// Claim a Created chore. `caller` becomes the child.
    ///
    /// # Errors
    ///
    /// `AlreadyAccepted`, `ChoreNotFound`, `ReentrancyGuardReentrantCall`.
    fn accept_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError>;

    /// Submit proof of completion. Child only.
    ///
    /// # Errors
    ///
    /// `NotChild`, `InvalidStatus`, `ChoreNotFound`,
    /// `ReentrancyGuardReentrantCall`.
    fn submit_proof(&self, caller: Address, id: ChoreId, proof_uri: &str)
        -> Result<(), ChoreError>;

    /// Approve a submitted chore and release the reward to the child. Parent
    /// only.
    ///
    /// # Errors
    ///
    /// `NotParent`, `AlreadyCompletedOrRejected`, `InvalidStatus`,
    /// `SafeERC20FailedOperation`, `ChoreNotFound`,
    /// `ReentrancyGuardReentrantCall`.
    fn approve_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError>;

    /// Reject a submitted chore and refund the reward to the parent. Parent
    /// only.
    ///
    /// # Errors
    ///
    /// Same as [`ChoreRegistryApi::approve_chore`].
    fn reject_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError>;

    /// Full record.
    ///
    /// # Errors
    ///
    /// `ChoreNotFound` for an unknown id.
    fn get_chore(&self, id: ChoreId) -> Result<Chore, ChoreError>;

    /// Same data as [`ChoreRegistryApi::get_chore`] in positional form.
    ///
    /// # Errors
    ///
    /// `ChoreNotFound` for an unknown id.
    fn chores(&self, id: ChoreId) -> Result<ChoreTuple, ChoreError>;

    /// Ids created by `parent`, in creation order.
    fn chores_by_parent(&self, parent: Address) -> Vec<ChoreId>;

    /// Ids accepted by `child`, in acceptance order.
    fn chores_by_child(&self, child: Address) -> Vec<ChoreId>;

    /// Every id, in creation order.
    fn all_chore_ids(&self) -> Vec<ChoreId>;

    /// Number of chores ever created.
    fn total_chores(&self) -> u64;

    /// Reward still held in custody for `id` (zero once terminal).
    ///
    /// # Errors
    ///
    /// `ChoreNotFound` for an unknown id.
    fn custody_of(&self, id: ChoreId) -> Result<U256, ChoreError>;

    /// Sum of rewards held in custody in `token`.
    fn total_custody(&self, token: Address) -> U256;
}
