//! # Attack Simulations
//!
//! Tokens that misbehave while the registry holds custody:
//!
//! - A callback token that re-enters the registry mid-transfer
//! - Tokens that return `false` instead of reverting
//! - A token that reverts on payout
//! - Racing claimants on different threads

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use chore_escrow::adapters::{TransferCall, TransferKind};
    use chore_escrow::prelude::*;
    use parking_lot::Mutex;
    use std::sync::{Arc, Barrier};
    use std::thread;

    type Attempts = Arc<Mutex<Vec<(&'static str, Result<(), ChoreError>)>>>;

    /// Installs a hook that, on the first transfer of `kind`, fires `attack`
    /// against the registry and records each outcome.
    fn arm<F>(
        harness: &TestRegistry,
        token: &InMemoryToken,
        kind: TransferKind,
        attack: F,
    ) -> Attempts
    where
        F: Fn(&InMemoryRegistry) -> Vec<(&'static str, Result<(), ChoreError>)>
            + Send
            + Sync
            + 'static,
    {
        let attempts: Attempts = Arc::default();
        let record = attempts.clone();
        let registry = Arc::downgrade(&harness.registry);
        let fired = Arc::new(Mutex::new(false));

        token.set_transfer_hook(Arc::new(move |call: TransferCall| {
            if call.kind != kind {
                return;
            }
            {
                let mut fired = fired.lock();
                if *fired {
                    return;
                }
                *fired = true;
            }
            if let Some(registry) = registry.upgrade() {
                let outcomes = attack(registry.as_ref());
                record.lock().extend(outcomes);
            }
        }));
        attempts
    }

    // =========================================================================
    // REENTRANCY
    // =========================================================================

    #[test]
    fn test_reentry_during_funding_pull() {
        let (harness, token) = setup();
        let existing = post(&harness, 10);

        let attempts = arm(&harness, &token, TransferKind::TransferFrom, move |registry| {
            vec![
                (
                    "create",
                    registry
                        .create_chore(PARENT, "x", "y", U256::from(1), TOKEN)
                        .map(|_| ()),
                ),
                ("accept", registry.accept_chore(CHILD_A, existing)),
            ]
        });

        let id = post(&harness, 25);

        assert_eq!(
            *attempts.lock(),
            vec![
                ("create", Err(ChoreError::ReentrancyGuardReentrantCall)),
                ("accept", Err(ChoreError::ReentrancyGuardReentrantCall)),
            ]
        );
        assert_eq!(id, ChoreId::new(2));
        assert_eq!(harness.registry.total_chores(), 2);
        assert_eq!(
            harness.registry.get_chore(existing).unwrap().status,
            ChoreStatus::Created
        );
        assert_custody_balanced(&harness, &token);
    }

    #[test]
    fn test_reentry_during_refund_cannot_double_pay() {
        let (harness, token) = setup();
        let id = post_and_submit(&harness, 100, CHILD_A);

        let attempts = arm(&harness, &token, TransferKind::Transfer, move |registry| {
            // The record is still Submitted from the callback's point of view.
            assert_eq!(
                registry.get_chore(id).map(|c| c.status),
                Ok(ChoreStatus::Submitted)
            );
            vec![
                ("approve", registry.approve_chore(PARENT, id)),
                ("reject", registry.reject_chore(PARENT, id)),
            ]
        });

        harness.registry.reject_chore(PARENT, id).unwrap();

        assert!(attempts
            .lock()
            .iter()
            .all(|(_, r)| *r == Err(ChoreError::ReentrancyGuardReentrantCall)));
        assert_eq!(token.balance_of(CHILD_A), U256::zero());
        assert_eq!(token.balance_of(PARENT), U256::from(PARENT_FUNDS));
        assert_eq!(token.balance_of(harness.registry.address()), U256::zero());

        let refunds = harness
            .events
            .events_for(id)
            .into_iter()
            .filter(|e| matches!(e, ChoreEvent::ChoreRefunded { .. }))
            .count();
        assert_eq!(refunds, 1);
    }

    #[test]
    fn test_registry_usable_after_refused_reentry() {
        let (harness, token) = setup();
        let first = post_and_submit(&harness, 50, CHILD_A);

        arm(&harness, &token, TransferKind::Transfer, move |registry| {
            vec![("approve", registry.approve_chore(PARENT, first))]
        });
        harness.registry.approve_chore(PARENT, first).unwrap();
        token.clear_transfer_hook();

        assert!(!harness.registry.is_busy());
        let second = post_and_submit(&harness, 30, CHILD_B);
        harness.registry.approve_chore(PARENT, second).unwrap();
        assert_eq!(token.balance_of(CHILD_B), U256::from(30));
        assert_all_invariants(&harness);
    }

    #[test]
    fn test_any_reentry_is_refused_before_other_checks() {
        let (harness, token) = setup();
        let id = post_and_submit(&harness, 10, CHILD_A);

        let attempts = arm(&harness, &token, TransferKind::Transfer, move |registry| {
            assert!(registry.is_busy());
            vec![
                ("approve stranger", registry.approve_chore(STRANGER, id)),
                ("reject stranger", registry.reject_chore(STRANGER, id)),
                ("submit stranger", registry.submit_proof(STRANGER, id, "ipfs://x")),
                ("accept", registry.accept_chore(STRANGER, id)),
                (
                    "approve unknown id",
                    registry.approve_chore(PARENT, ChoreId::new(99)),
                ),
                (
                    "accept unknown id",
                    registry.accept_chore(CHILD_B, ChoreId::new(99)),
                ),
                (
                    "create zero reward",
                    registry
                        .create_chore(PARENT, "x", "y", U256::zero(), TOKEN)
                        .map(|_| ()),
                ),
            ]
        });
        harness.registry.approve_chore(PARENT, id).unwrap();

        let attempts = attempts.lock();
        assert_eq!(attempts.len(), 7);
        for (name, outcome) in attempts.iter() {
            assert_eq!(
                *outcome,
                Err(ChoreError::ReentrancyGuardReentrantCall),
                "{name}"
            );
        }
        assert_eq!(
            harness.registry.get_chore(id).unwrap().status,
            ChoreStatus::Approved
        );
    }

    #[test]
    fn test_role_checked_outside_reentry() {
        let (harness, _) = setup();
        let id = post_and_submit(&harness, 10, CHILD_A);

        assert_eq!(
            harness.registry.approve_chore(STRANGER, id),
            Err(ChoreError::NotParent)
        );
        assert_eq!(
            harness.registry.approve_chore(PARENT, ChoreId::new(99)),
            Err(ChoreError::ChoreNotFound(ChoreId::new(99)))
        );
    }

    // =========================================================================
    // NON-REVERTING FAILURES
    // =========================================================================

    #[test]
    fn test_false_return_on_pull_is_failure() {
        let (harness, token) = setup();
        // Allowance covers the reward but the balance does not.
        let poor = Address::repeat(0x44);
        token.mint(poor, U256::from(5));
        token.approve(poor, harness.registry.address(), U256::from(100));
        token.set_behavior(TokenBehavior::FalseOnFailure);

        assert_eq!(
            harness
                .registry
                .create_chore(poor, "t", "d", U256::from(100), TOKEN),
            Err(ChoreError::SafeERC20FailedOperation(TOKEN))
        );
        assert_eq!(harness.registry.total_chores(), 0);
        assert!(harness.registry.chores_by_parent(poor).is_empty());
        assert_eq!(token.balance_of(poor), U256::from(5));
        assert!(harness.events.is_empty());
    }

    #[test]
    fn test_false_return_on_payout_rolls_back() {
        let (harness, token) = setup();
        let id = post_and_submit(&harness, 100, CHILD_A);
        let before = harness.registry.get_chore(id).unwrap();
        let events_before = harness.events.len();

        token.set_behavior(TokenBehavior::AlwaysFalse);
        assert_eq!(
            harness.registry.approve_chore(PARENT, id),
            Err(ChoreError::SafeERC20FailedOperation(TOKEN))
        );

        assert_eq!(harness.registry.get_chore(id).unwrap(), before);
        assert_eq!(harness.registry.custody_of(id).unwrap(), U256::from(100));
        assert_eq!(harness.events.len(), events_before);
        assert_custody_balanced(&harness, &token);
    }

    #[test]
    fn test_reverting_refund_rolls_back_then_recovers() {
        let (harness, token) = setup();
        let id = post_and_submit(&harness, 100, CHILD_A);

        token.set_behavior(TokenBehavior::Paused);
        assert_eq!(
            harness.registry.reject_chore(PARENT, id),
            Err(ChoreError::SafeERC20FailedOperation(TOKEN))
        );
        assert_eq!(
            harness.registry.get_chore(id).unwrap().status,
            ChoreStatus::Submitted
        );

        token.set_behavior(TokenBehavior::Standard);
        harness.registry.reject_chore(PARENT, id).unwrap();
        assert_eq!(token.balance_of(PARENT), U256::from(PARENT_FUNDS));
        assert_eq!(harness.registry.stats().rejected_calls, 1);
    }

    // =========================================================================
    // RACING CALLERS
    // =========================================================================

    #[test]
    fn test_racing_claimants_single_winner() {
        let (harness, _) = setup();
        let id = post(&harness, 100);

        let claimants: Vec<Address> = (1..=8u8).map(Address::repeat).collect();
        let barrier = Arc::new(Barrier::new(claimants.len()));

        let handles: Vec<_> = claimants
            .iter()
            .map(|&claimant| {
                let registry = harness.registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    (claimant, registry.accept_chore(claimant, id))
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<Address> = outcomes
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(a, _)| *a)
            .collect();

        assert_eq!(winners.len(), 1);
        assert!(outcomes
            .iter()
            .filter(|(_, r)| r.is_err())
            .all(|(_, r)| *r == Err(ChoreError::AlreadyAccepted)));
        assert_eq!(
            harness.registry.get_chore(id).unwrap().child,
            Some(winners[0])
        );
        assert_eq!(harness.registry.chores_by_child(winners[0]), vec![id]);
    }
}
