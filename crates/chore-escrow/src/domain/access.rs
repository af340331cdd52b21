//! # Access Control
//!
//! Resolves a caller against the role an operation requires. The check is a
//! pure predicate: it reads the committed record and returns a typed failure,
//! it never mutates anything.
//!
//! | Operation | Required role |
//! |-----------|---------------|
//! | `create_chore` | none (caller becomes the parent) |
//! | `accept_chore` | none (caller becomes the child) |
//! | `submit_proof` | [`Role::Child`] |
//! | `approve_chore` | [`Role::Parent`] |
//! | `reject_chore` | [`Role::Parent`] |

use crate::domain::entities::Chore;
use crate::domain::value_objects::Address;
use crate::errors::ChoreError;
use serde::{Deserialize, Serialize};

/// Role a caller must hold on a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The account that created and funded the chore.
    Parent,
    /// The account that accepted the chore.
    Child,
}

impl Role {
    /// Returns `Ok(())` if `caller` holds this role on `chore`.
    ///
    /// A chore without a child rejects every `Child` check.
    pub fn authorize(self, chore: &Chore, caller: Address) -> Result<(), ChoreError> {
        match self {
            Self::Parent if chore.parent == caller => Ok(()),
            Self::Parent => Err(ChoreError::NotParent),
            Self::Child if chore.child == Some(caller) => Ok(()),
            Self::Child => Err(ChoreError::NotChild),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
