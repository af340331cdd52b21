//! Shared setup for integration flows.

use chore_escrow::prelude::*;
use std::sync::Arc;

/// Reward token used by most flows.
pub const TOKEN: Address = Address([0x70; 20]);
/// Parent account.
pub const PARENT: Address = Address([0x11; 20]);
/// First child account.
pub const CHILD_A: Address = Address([0xa0; 20]);
/// Second child account.
pub const CHILD_B: Address = Address([0xb0; 20]);
/// An account with no role on any chore.
pub const STRANGER: Address = Address([0x99; 20]);

/// Parent starting balance in [`setup`].
pub const PARENT_FUNDS: u64 = 10_000;

/// Fresh registry with one token and a funded, pre-approved parent.
pub fn setup() -> (TestRegistry, Arc<InMemoryToken>) {
    chore_telemetry::init_test_logging();
    let harness = create_test_registry();
    let token = harness.deploy_token(TOKEN);
    harness.fund(&token, PARENT, U256::from(PARENT_FUNDS));
    (harness, token)
}

/// Creates a chore worth `reward` from [`PARENT`].
pub fn post(harness: &TestRegistry, reward: u64) -> ChoreId {
    harness
        .registry
        .create_chore(
            PARENT,
            "Take out the trash",
            "Both bins, before Thursday",
            U256::from(reward),
            TOKEN,
        )
        .expect("creation should succeed")
}

/// Drives a chore to Submitted with `child` as the claimant.
pub fn post_and_submit(harness: &TestRegistry, reward: u64, child: Address) -> ChoreId {
    let id = post(harness, reward);
    harness
        .registry
        .accept_chore(child, id)
        .expect("accept should succeed");
    harness
        .registry
        .submit_proof(child, id, "ipfs://proof")
        .expect("submit should succeed");
    id
}

/// Asserts every stored record satisfies the record invariants.
pub fn assert_all_invariants(harness: &TestRegistry) {
    for id in harness.registry.all_chore_ids() {
        let chore = harness.registry.get_chore(id).expect("listed id exists");
        assert!(
            check_chore_invariants(&chore).is_valid(),
            "invariants violated for chore {id}: {chore:?}"
        );
    }
}

/// Asserts the custodian balance equals the sum of open rewards.
pub fn assert_custody_balanced(harness: &TestRegistry, token: &InMemoryToken) {
    assert_eq!(
        token.balance_of(harness.registry.address()),
        harness.registry.total_custody(token.address()),
        "custodian balance diverged from open rewards"
    );
}
