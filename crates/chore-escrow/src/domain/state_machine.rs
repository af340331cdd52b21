//! # Chore State Machine
//!
//! Lifecycle transitions applied to a single record. Each transition checks
//! the stored status against its precondition and fails without touching the
//! record when it does not match. Role checks live in [`super::access`];
//! token movement lives in the custody adapter.

use crate::domain::entities::{Chore, ChoreStatus};
use crate::domain::value_objects::{Address, Timestamp};
use crate::errors::ChoreError;

impl Chore {
    /// Created -> Accepted. Records `child` as the claimant.
    ///
    /// Any status past Created fails with `AlreadyAccepted`.
    pub fn accept(&mut self, child: Address, now: Timestamp) -> Result<(), ChoreError> {
        if self.status != ChoreStatus::Created {
            return Err(ChoreError::AlreadyAccepted);
        }
        self.child = Some(child);
        self.advance(ChoreStatus::Accepted, now);
        Ok(())
    }

    /// Accepted -> Submitted. Stores the proof reference.
    pub fn submit_proof(&mut self, proof_uri: String, now: Timestamp) -> Result<(), ChoreError> {
        if self.status != ChoreStatus::Accepted {
            return Err(ChoreError::InvalidStatus);
        }
        self.proof_uri = Some(proof_uri);
        self.advance(ChoreStatus::Submitted, now);
        Ok(())
    }

    /// Submitted -> Approved. Returns the payee (the child).
    pub fn approve(&mut self, now: Timestamp) -> Result<Address, ChoreError> {
        self.ensure_under_review()?;
        let child = self.child.ok_or(ChoreError::InvalidStatus)?;
        self.advance(ChoreStatus::Approved, now);
        Ok(child)
    }

    /// Submitted -> Rejected. Returns the refund recipient (the parent).
    pub fn reject(&mut self, now: Timestamp) -> Result<Address, ChoreError> {
        self.ensure_under_review()?;
        self.advance(ChoreStatus::Rejected, now);
        Ok(self.parent)
    }

    /// Precondition shared by approve and reject.
    pub fn ensure_under_review(&self) -> Result<(), ChoreError> {
        match self.status {
            ChoreStatus::Submitted => Ok(()),
            status if status.is_terminal() => Err(ChoreError::AlreadyCompletedOrRejected),
            _ => Err(ChoreError::InvalidStatus),
        }
    }

    // `updated_at` never moves backwards, even if the clock does.
    fn advance(&mut self, next: ChoreStatus, now: Timestamp) {
        debug_assert!(self.status.can_transition_to(next));
        self.status = next;
        self.updated_at = self.updated_at.max(now);
    }
}

// =============================================================================
// TESTS
// =============================================================================
