//! # Chore Registry Service
//!
//! The registry owns every chore record and both lookup indices, holds
//! rewards in custody, and emits one event per committed transition.
//!
//! ## Mutation pipeline
//!
//! ```text
//! execution lock ─→ reentrancy guard ─→ load snapshot ─→ access control
//!     ─→ transition on a copy ─→ token custody ─→ commit ─→ emit ─→ release
//! ```
//!
//! The store lock is never held across a token call. A failure at any step
//! drops the copy, so records, indices and custody stay exactly as they were.
//!
//! ## Concurrency
//!
//! Mutations from different threads queue on a re-entrant execution lock.
//! A token callback on the same thread passes that lock and is then refused
//! by the reentrancy guard. Reads take only the store's read lock and see the
//! last committed state.

use crate::adapters::{
    InMemoryEventLog, InMemoryToken, InMemoryTokenDirectory, ManualClock, TokenCustody,
    DEFAULT_CHANNEL_CAPACITY,
};
use crate::domain::access::Role;
use crate::domain::entities::{Chore, ChoreTuple, NewChore};
use crate::domain::invariants::{check_chore_invariants, check_transition_invariant};
use crate::domain::value_objects::{Address, ChoreId, U256};
use crate::errors::{ChoreError, ConfigError};
use crate::events::{ChoreEvent, EmittedEvent};
use crate::guard::{GuardScope, ReentrancyGuard};
use crate::ports::inbound::ChoreRegistryApi;
use crate::ports::outbound::{Clock, EventSink, TokenDirectory};

use parking_lot::{ReentrantMutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Address of the deployed registry contract.
pub const DEFAULT_REGISTRY_ADDRESS: Address = Address([
    0x00, 0xca, 0x27, 0x5f, 0x0c, 0x7a, 0xcb, 0xb9, 0x49, 0xb1, 0x5b, 0x1e, 0x66, 0x26, 0xdc,
    0x25, 0xc6, 0x8e, 0xce, 0x82,
]);

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Custody account and log emitter.
    pub registry_address: Address,
    /// Capacity for broadcast sinks built from this config.
    pub event_channel_capacity: usize,
    /// Render EVM logs alongside events.
    pub emit_logs: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry_address: DEFAULT_REGISTRY_ADDRESS,
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            emit_logs: true,
        }
    }
}

impl RegistryConfig {
    /// Environment variable overriding `registry_address`.
    pub const ENV_REGISTRY_ADDRESS: &'static str = "CHORE_REGISTRY_ADDRESS";
    /// Environment variable overriding `event_channel_capacity`.
    pub const ENV_EVENT_CAPACITY: &'static str = "CHORE_EVENT_CAPACITY";

    /// Load configuration from environment variables, defaulting unset ones.
    ///
    /// # Errors
    ///
    /// `ConfigError` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RegistryConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// `ConfigError` if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::ENV_REGISTRY_ADDRESS) {
            config.registry_address =
                Address::from_hex(value.trim()).ok_or_else(|| ConfigError::InvalidAddress {
                    var: Self::ENV_REGISTRY_ADDRESS,
                    value,
                })?;
        }

        if let Some(value) = lookup(Self::ENV_EVENT_CAPACITY) {
            config.event_channel_capacity = match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: Self::ENV_EVENT_CAPACITY,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters over the registry's lifetime.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Chores created.
    pub chores_created: u64,
    /// Chores accepted.
    pub chores_accepted: u64,
    /// Proofs submitted.
    pub proofs_submitted: u64,
    /// Chores approved.
    pub chores_approved: u64,
    /// Chores rejected.
    pub chores_rejected: u64,
    /// Rewards released to children.
    pub total_paid_out: U256,
    /// Rewards returned to parents.
    pub total_refunded: U256,
    /// Mutating calls that failed.
    pub rejected_calls: u64,
}

// =============================================================================
// STORE
// =============================================================================

/// Records and indices. Ids are 1-based positions in `chores`.
#[derive(Debug, Default)]
struct RegistryState {
    chores: Vec<Chore>,
    by_parent: HashMap<Address, Vec<ChoreId>>,
    by_child: HashMap<Address, Vec<ChoreId>>,
}

impl RegistryState {
    fn next_id(&self) -> ChoreId {
        ChoreId::new(self.chores.len() as u64 + 1)
    }

    fn slot(id: ChoreId) -> Option<usize> {
        id.get()
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
    }

    fn get(&self, id: ChoreId) -> Option<&Chore> {
        Self::slot(id).and_then(|index| self.chores.get(index))
    }

    fn insert(&mut self, chore: Chore) {
        debug_assert_eq!(chore.id, self.next_id());
        self.by_parent.entry(chore.parent).or_default().push(chore.id);
        self.chores.push(chore);
    }

    fn replace(&mut self, chore: Chore) {
        if let Some(slot) = Self::slot(chore.id).and_then(|index| self.chores.get_mut(index)) {
            *slot = chore;
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The chore escrow registry.
pub struct ChoreRegistry<D, C, E> {
    config: RegistryConfig,
    custody: TokenCustody<D>,
    clock: C,
    events: E,
    state: RwLock<RegistryState>,
    execution: ReentrantMutex<()>,
    guard: ReentrancyGuard,
    sequence: AtomicU64,
    stats: RwLock<RegistryStats>,
}

impl<D: TokenDirectory, C: Clock, E: EventSink> ChoreRegistry<D, C, E> {
    /// Create a registry with no chores.
    pub fn new(config: RegistryConfig, directory: D, clock: C, events: E) -> Self {
        let custody = TokenCustody::new(directory, config.registry_address);
        Self {
            config,
            custody,
            clock,
            events,
            state: RwLock::new(RegistryState::default()),
            execution: ReentrantMutex::new(()),
            guard: ReentrancyGuard::new(),
            sequence: AtomicU64::new(0),
            stats: RwLock::new(RegistryStats::default()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The registry's custody account.
    pub fn address(&self) -> Address {
        self.config.registry_address
    }

    /// Get current registry statistics.
    pub fn stats(&self) -> RegistryStats {
        self.stats.read().clone()
    }

    /// Whether a mutating operation is in progress.
    pub fn is_busy(&self) -> bool {
        self.guard.is_entered()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, title, description), fields(chore_id = tracing::field::Empty))]
    fn create(
        &self,
        caller: Address,
        title: &str,
        description: &str,
        reward: U256,
        token: Address,
    ) -> Result<ChoreId, ChoreError> {
        let _execution = self.execution.lock();
        let _entered = self.enter()?;

        if reward.is_zero() {
            return Err(ChoreError::InvalidAmount);
        }
        if token.is_zero() {
            return Err(ChoreError::ZeroAddress);
        }

        let id = self.state.read().next_id();
        tracing::Span::current().record("chore_id", id.get());
        let chore = Chore::new(
            id,
            caller,
            NewChore::new(title, description, reward, token),
            self.clock.now(),
        );
        debug_assert!(check_chore_invariants(&chore).is_valid());

        self.move_funds(Custody::Pull, token, caller, reward)?;
        self.state.write().insert(chore);

        info!(%id, parent = %caller, %reward, %token, "chore created");
        self.stats.write().chores_created += 1;
        self.emit(ChoreEvent::ChoreCreated {
            id,
            parent: caller,
            reward,
            token,
        });
        Ok(id)
    }

    #[instrument(skip(self))]
    fn accept(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        let _execution = self.execution.lock();
        let _entered = self.enter()?;
        let current = self.load(id)?;

        let mut next = current.clone();
        next.accept(caller, self.clock.now())?;
        self.commit(&current, next, |state| {
            state.by_child.entry(caller).or_default().push(id);
        });

        info!(%id, child = %caller, "chore accepted");
        self.stats.write().chores_accepted += 1;
        self.emit(ChoreEvent::ChoreAccepted { id, child: caller });
        Ok(())
    }

    #[instrument(skip(self, proof_uri))]
    fn submit(&self, caller: Address, id: ChoreId, proof_uri: &str) -> Result<(), ChoreError> {
        let _execution = self.execution.lock();
        let _entered = self.enter()?;
        let current = self.load(id)?;
        self.authorize(Role::Child, &current, caller)?;

        let mut next = current.clone();
        next.submit_proof(proof_uri.to_owned(), self.clock.now())?;
        self.commit(&current, next, |_| {});

        info!(%id, child = %caller, proof_uri, "proof submitted");
        self.stats.write().proofs_submitted += 1;
        self.emit(ChoreEvent::ChoreSubmitted {
            id,
            child: caller,
            proof_uri: proof_uri.to_owned(),
        });
        Ok(())
    }

    #[instrument(skip(self))]
    fn approve(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        let _execution = self.execution.lock();
        let _entered = self.enter()?;
        let current = self.load(id)?;
        self.authorize(Role::Parent, &current, caller)?;

        let mut next = current.clone();
        let child = next.approve(self.clock.now())?;
        self.move_funds(Custody::Push, next.token, child, next.reward)?;
        let reward = next.reward;
        self.commit(&current, next, |_| {});

        info!(%id, parent = %caller, %child, %reward, "chore approved");
        {
            let mut stats = self.stats.write();
            stats.chores_approved += 1;
            stats.total_paid_out = stats.total_paid_out.saturating_add(reward);
        }
        self.emit(ChoreEvent::ChoreApproved {
            id,
            parent: caller,
            child,
            reward,
        });
        Ok(())
    }

    #[instrument(skip(self))]
    fn reject(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        let _execution = self.execution.lock();
        let _entered = self.enter()?;
        let current = self.load(id)?;
        self.authorize(Role::Parent, &current, caller)?;

        let mut next = current.clone();
        let parent = next.reject(self.clock.now())?;
        self.move_funds(Custody::Push, next.token, parent, next.reward)?;
        let amount = next.reward;
        self.commit(&current, next, |_| {});

        info!(%id, %parent, %amount, "chore rejected and refunded");
        {
            let mut stats = self.stats.write();
            stats.chores_rejected += 1;
            stats.total_refunded = stats.total_refunded.saturating_add(amount);
        }
        self.emit(ChoreEvent::ChoreRejected { id, parent });
        self.emit(ChoreEvent::ChoreRefunded { id, parent, amount });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pipeline steps
    // -------------------------------------------------------------------------

    fn load(&self, id: ChoreId) -> Result<Chore, ChoreError> {
        self.state
            .read()
            .get(id)
            .cloned()
            .ok_or(ChoreError::ChoreNotFound(id))
    }

    fn authorize(&self, role: Role, chore: &Chore, caller: Address) -> Result<(), ChoreError> {
        role.authorize(chore, caller).inspect_err(|e| {
            warn!(id = %chore.id, %caller, ?role, error = %e, "unauthorized caller");
        })
    }

    fn enter(&self) -> Result<GuardScope<'_>, ChoreError> {
        self.guard.enter().inspect_err(|_| {
            warn!("reentrant call refused");
        })
    }

    fn move_funds(
        &self,
        direction: Custody,
        token: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), ChoreError> {
        debug!(?direction, %token, %account, %amount, "custody transfer");
        let result = match direction {
            Custody::Pull => self.custody.pull(token, account, amount),
            Custody::Push => self.custody.push(token, account, amount),
        };
        result.inspect_err(|e| {
            error!(?direction, %token, %account, %amount, error = %e, "custody transfer failed");
        })
    }

    fn commit<F>(&self, before: &Chore, after: Chore, index: F)
    where
        F: FnOnce(&mut RegistryState),
    {
        debug_assert!(check_transition_invariant(before, &after));
        debug_assert!(check_chore_invariants(&after).is_valid());

        let mut state = self.state.write();
        index(&mut state);
        state.replace(after);
    }

    fn emit(&self, event: ChoreEvent) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let log = self
            .config
            .emit_logs
            .then(|| event.to_log(self.config.registry_address));
        self.events.emit(&EmittedEvent {
            sequence,
            event,
            log,
        });
    }

    fn tally<T>(&self, result: Result<T, ChoreError>) -> Result<T, ChoreError> {
        if result.is_err() {
            self.stats.write().rejected_calls += 1;
        }
        result
    }
}

/// Direction of a custody transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Custody {
    Pull,
    Push,
}

// =============================================================================
// ChoreRegistryApi Implementation
// =============================================================================

impl<D: TokenDirectory, C: Clock, E: EventSink> ChoreRegistryApi for ChoreRegistry<D, C, E> {
    fn create_chore(
        &self,
        caller: Address,
        title: &str,
        description: &str,
        reward: U256,
        token: Address,
    ) -> Result<ChoreId, ChoreError> {
        self.tally(self.create(caller, title, description, reward, token))
    }

    fn accept_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        self.tally(self.accept(caller, id))
    }

    fn submit_proof(
        &self,
        caller: Address,
        id: ChoreId,
        proof_uri: &str,
    ) -> Result<(), ChoreError> {
        self.tally(self.submit(caller, id, proof_uri))
    }

    fn approve_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        self.tally(self.approve(caller, id))
    }

    fn reject_chore(&self, caller: Address, id: ChoreId) -> Result<(), ChoreError> {
        self.tally(self.reject(caller, id))
    }

    fn get_chore(&self, id: ChoreId) -> Result<Chore, ChoreError> {
        self.load(id)
    }

    fn chores(&self, id: ChoreId) -> Result<ChoreTuple, ChoreError> {
        self.state
            .read()
            .get(id)
            .map(Chore::to_tuple)
            .ok_or(ChoreError::ChoreNotFound(id))
    }

    fn chores_by_parent(&self, parent: Address) -> Vec<ChoreId> {
        self.state
            .read()
            .by_parent
            .get(&parent)
            .cloned()
            .unwrap_or_default()
    }

    fn chores_by_child(&self, child: Address) -> Vec<ChoreId> {
        self.state
            .read()
            .by_child
            .get(&child)
            .cloned()
            .unwrap_or_default()
    }

    fn all_chore_ids(&self) -> Vec<ChoreId> {
        self.state.read().chores.iter().map(|c| c.id).collect()
    }

    fn total_chores(&self) -> u64 {
        self.state.read().chores.len() as u64
    }

    fn custody_of(&self, id: ChoreId) -> Result<U256, ChoreError> {
        self.state
            .read()
            .get(id)
            .map(Chore::custody)
            .ok_or(ChoreError::ChoreNotFound(id))
    }

    fn total_custody(&self, token: Address) -> U256 {
        self.state
            .read()
            .chores
            .iter()
            .filter(|c| c.token == token)
            .fold(U256::zero(), |acc, c| acc.saturating_add(c.custody()))
    }
}

// =============================================================================
// IN-MEMORY WIRING
// =============================================================================

/// Registry wired to in-memory adapters.
pub type InMemoryRegistry =
    ChoreRegistry<Arc<InMemoryTokenDirectory>, Arc<ManualClock>, Arc<InMemoryEventLog>>;

/// An in-memory registry together with handles to its adapters.
pub struct TestRegistry {
    /// The registry.
    pub registry: Arc<InMemoryRegistry>,
    /// Token directory the registry resolves tokens through.
    pub directory: Arc<InMemoryTokenDirectory>,
    /// Clock the registry stamps records with.
    pub clock: Arc<ManualClock>,
    /// Every event the registry emitted.
    pub events: Arc<InMemoryEventLog>,
}

impl TestRegistry {
    /// Deploys an empty token at `address` and registers it.
    pub fn deploy_token(&self, address: Address) -> Arc<InMemoryToken> {
        let token = Arc::new(InMemoryToken::new(address));
        self.directory.register(token.clone());
        token
    }

    /// Mints `amount` to `owner` and approves the registry for it.
    pub fn fund(&self, token: &InMemoryToken, owner: Address, amount: U256) {
        token.mint(owner, amount);
        token.approve(owner, self.registry.address(), amount);
    }
}

/// Creates a registry for testing.
pub fn create_test_registry() -> TestRegistry {
    create_test_registry_with(RegistryConfig::default())
}

/// Creates a registry for testing with a custom config.
pub fn create_test_registry_with(config: RegistryConfig) -> TestRegistry {
    let directory = Arc::new(InMemoryTokenDirectory::new());
    let clock = Arc::new(ManualClock::default());
    let events = Arc::new(InMemoryEventLog::new());
    let registry = Arc::new(ChoreRegistry::new(
        config,
        directory.clone(),
        clock.clone(),
        events.clone(),
    ));
    TestRegistry {
        registry,
        directory,
        clock,
        events,
    }
}

// =============================================================================
// TESTS
// =============================================================================
