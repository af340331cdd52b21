//! # Core Domain Entities
//!
//! The `Chore` record, its lifecycle status, and the EVM-style log that
//! events are rendered into.

use crate::domain::value_objects::{Address, ChoreId, Hash, Timestamp, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CHORE STATUS
// =============================================================================

/// Lifecycle position of a chore.
///
/// The discriminants are the `uint8` codes of the registry ABI.
///
/// ```text
/// Created ──accept──→ Accepted ──submit──→ Submitted ──approve──→ Approved
///                                               └──────reject───→ Rejected
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChoreStatus {
    /// Funded by the parent, open for a child to claim.
    #[default]
    Created = 0,
    /// Claimed by a child.
    Accepted = 1,
    /// Child has submitted proof of completion.
    Submitted = 2,
    /// Parent approved; reward released to the child.
    Approved = 3,
    /// Parent rejected; reward returned to the parent.
    Rejected = 4,
}

impl ChoreStatus {
    /// Check if transition is valid.
    #[must_use]
    pub fn can_transition_to(&self, next: ChoreStatus) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Accepted)
                | (Self::Accepted, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::Rejected)
        )
    }

    /// Check if terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// True while the reward sits in registry custody.
    #[must_use]
    pub fn holds_custody(&self) -> bool {
        !self.is_terminal()
    }

    /// ABI status code.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ChoreStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Created),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Submitted),
            3 => Ok(Self::Approved),
            4 => Ok(Self::Rejected),
            other => Err(other),
        }
    }
}

impl fmt::Display for ChoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// CHORE
// =============================================================================

/// Parameters supplied by a parent when posting a chore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewChore {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Token amount promised to the child.
    pub reward: U256,
    /// Fungible-token contract the reward is paid in.
    pub token: Address,
}

impl NewChore {
    /// Convenience constructor.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        reward: U256,
        token: Address,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            reward,
            token,
        }
    }
}

/// An escrowed task record.
///
/// `id`, `parent`, `title`, `description`, `reward`, `token` and `created_at`
/// are fixed at creation. `child` is written once at acceptance and
/// `proof_uri` once at submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    /// Registry-assigned id.
    pub id: ChoreId,
    /// Account that posted and funded the chore.
    pub parent: Address,
    /// Account that claimed the chore, unset while Created.
    pub child: Option<Address>,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Proof of completion, unset until submission.
    pub proof_uri: Option<String>,
    /// Reward amount held in custody.
    pub reward: U256,
    /// Reward token contract.
    pub token: Address,
    /// Lifecycle status.
    pub status: ChoreStatus,
    /// Creation time.
    pub created_at: Timestamp,
    /// Time of the last transition.
    pub updated_at: Timestamp,
}

/// Positional form of a chore, field order as returned by `chores(id)`:
/// id, parent, child, title, description, proofURI, reward, token, status,
/// createdAt, updatedAt.
///
/// An unset child is the zero address and an unset proof is the empty string.
pub type ChoreTuple = (
    ChoreId,
    Address,
    Address,
    String,
    String,
    String,
    U256,
    Address,
    u8,
    Timestamp,
    Timestamp,
);

impl Chore {
    /// Creates a freshly funded record in the Created status.
    #[must_use]
    pub fn new(id: ChoreId, parent: Address, params: NewChore, now: Timestamp) -> Self {
        Self {
            id,
            parent,
            child: None,
            title: params.title,
            description: params.description,
            proof_uri: None,
            reward: params.reward,
            token: params.token,
            status: ChoreStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reward amount attributable to this record in registry custody.
    #[must_use]
    pub fn custody(&self) -> U256 {
        if self.status.holds_custody() {
            self.reward
        } else {
            U256::zero()
        }
    }

    /// Positional snapshot.
    #[must_use]
    pub fn to_tuple(&self) -> ChoreTuple {
        (
            self.id,
            self.parent,
            self.child.unwrap_or(Address::ZERO),
            self.title.clone(),
            self.description.clone(),
            self.proof_uri.clone().unwrap_or_default(),
            self.reward,
            self.token,
            self.status.as_u8(),
            self.created_at,
            self.updated_at,
        )
    }
}

// =============================================================================
// LOG
// =============================================================================

/// An EVM-style log entry rendered from a registry event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Registry address that emitted the log.
    pub address: Address,
    /// topic0 is the event signature hash, followed by indexed fields.
    pub topics: Vec<Hash>,
    /// ABI-encoded non-indexed fields.
    pub data: Vec<u8>,
}

impl Log {
    /// Creates a new log.
    #[must_use]
    pub fn new(address: Address, topics: Vec<Hash>, data: Vec<u8>) -> Self {
        Self {
            address,
            topics,
            data,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
