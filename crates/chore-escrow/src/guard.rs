//! # Reentrancy Guard
//!
//! A single flag shared by every state-changing registry operation. It is set
//! when an operation starts and cleared when the returned [`GuardScope`] is
//! dropped, on success and on every error path alike.
//!
//! A token that calls back into the registry from inside `transfer` runs on
//! the same thread as the outer operation, finds the flag set and fails with
//! [`ChoreError::ReentrancyGuardReentrantCall`].

use crate::errors::ChoreError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Non-reentrant section marker.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

impl ReentrancyGuard {
    /// Creates an unentered guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entered: AtomicBool::new(false),
        }
    }

    /// Enters the guarded section.
    ///
    /// # Errors
    ///
    /// `ReentrancyGuardReentrantCall` if the section is already entered.
    pub fn enter(&self) -> Result<GuardScope<'_>, ChoreError> {
        self.entered
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ChoreError::ReentrancyGuardReentrantCall)?;
        Ok(GuardScope { guard: self })
    }

    /// Whether an operation currently holds the guard.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

/// Proof of having entered the guard. Dropping it leaves the section.
#[must_use = "the guard is released as soon as the scope is dropped"]
#[derive(Debug)]
pub struct GuardScope<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}
