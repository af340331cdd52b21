//! # Domain Invariants
//!
//! Rules every stored record satisfies for its whole lifetime. The registry
//! checks them on each record it is about to commit (debug builds) and the
//! test suites check them after every scenario.
//!
//! - INVARIANT-1: reward is positive and the token is non-zero
//! - INVARIANT-2: child is unset iff status is Created
//! - INVARIANT-3: proof is set iff status is Submitted or terminal
//! - INVARIANT-4: `updated_at >= created_at`
//! - INVARIANT-5: a transition keeps immutable fields, follows the state
//!   graph and never moves `updated_at` backwards

use crate::domain::entities::{Chore, ChoreStatus};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Funded record.
#[must_use]
pub fn check_funding_invariant(chore: &Chore) -> bool {
    !chore.reward.is_zero() && !chore.token.is_zero()
}

/// INVARIANT-2: Child assignment matches status.
#[must_use]
pub fn check_child_invariant(chore: &Chore) -> bool {
    chore.child.is_none() == (chore.status == ChoreStatus::Created)
}

/// INVARIANT-3: Proof presence matches status.
#[must_use]
pub fn check_proof_invariant(chore: &Chore) -> bool {
    let expects_proof = matches!(
        chore.status,
        ChoreStatus::Submitted | ChoreStatus::Approved | ChoreStatus::Rejected
    );
    chore.proof_uri.is_some() == expects_proof
}

/// INVARIANT-4: Timestamps ordered.
#[must_use]
pub fn check_timestamp_invariant(chore: &Chore) -> bool {
    chore.updated_at >= chore.created_at
}

/// INVARIANT-5: `after` is a legal successor of `before`.
#[must_use]
pub fn check_transition_invariant(before: &Chore, after: &Chore) -> bool {
    let immutable_kept = before.id == after.id
        && before.parent == after.parent
        && before.title == after.title
        && before.description == after.description
        && before.reward == after.reward
        && before.token == after.token
        && before.created_at == after.created_at;
    let child_kept = before.child.is_none() || before.child == after.child;

    immutable_kept
        && child_kept
        && before.status.can_transition_to(after.status)
        && after.updated_at >= before.updated_at
}

/// Check all single-record invariants at once.
#[must_use]
pub fn check_chore_invariants(chore: &Chore) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_funding_invariant(chore) {
        violations.push(InvariantViolation::Unfunded);
    }
    if !check_child_invariant(chore) {
        violations.push(InvariantViolation::ChildMismatch {
            status: chore.status,
        });
    }
    if !check_proof_invariant(chore) {
        violations.push(InvariantViolation::ProofMismatch {
            status: chore.status,
        });
    }
    if !check_timestamp_invariant(chore) {
        violations.push(InvariantViolation::TimestampsOutOfOrder {
            created_at: chore.created_at,
            updated_at: chore.updated_at,
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A single invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Zero reward or zero token.
    Unfunded,
    /// Child presence disagrees with status.
    ChildMismatch {
        /// Status of the offending record.
        status: ChoreStatus,
    },
    /// Proof presence disagrees with status.
    ProofMismatch {
        /// Status of the offending record.
        status: ChoreStatus,
    },
    /// `updated_at` precedes `created_at`.
    TimestampsOutOfOrder {
        /// Creation time.
        created_at: u64,
        /// Last transition time.
        updated_at: u64,
    },
}

// =============================================================================
// TESTS
// =============================================================================
