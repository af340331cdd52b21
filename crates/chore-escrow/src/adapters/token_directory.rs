//! In-memory token directory.

use crate::domain::value_objects::Address;
use crate::ports::outbound::{FungibleToken, TokenDirectory};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps token addresses to deployed in-process token contracts.
#[derive(Default)]
pub struct InMemoryTokenDirectory {
    tokens: RwLock<HashMap<Address, Arc<dyn FungibleToken>>>,
}

impl InMemoryTokenDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` under its own address, replacing any earlier entry.
    pub fn register(&self, token: Arc<dyn FungibleToken>) {
        self.tokens.write().insert(token.address(), token);
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    /// True if no token is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

impl TokenDirectory for InMemoryTokenDirectory {
    fn resolve(&self, address: Address) -> Option<Arc<dyn FungibleToken>> {
        self.tokens.read().get(&address).cloned()
    }
}
