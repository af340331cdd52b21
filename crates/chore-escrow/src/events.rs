//! # Event Schema
//!
//! Events emitted by the chore registry, one per committed transition, plus
//! their rendering as EVM logs.
//!
//! ## Log layout (registry ABI)
//!
//! | Event | Indexed topics | Data |
//! |-------|----------------|------|
//! | `ChoreCreated` | id, parent | reward, token |
//! | `ChoreAccepted` | id, child | |
//! | `ChoreSubmitted` | id, child | proofURI |
//! | `ChoreApproved` | id, parent, child | reward |
//! | `ChoreRejected` | id, parent | |
//! | `ChoreRefunded` | id, parent | amount |
//!
//! topic0 of every log is the Keccak-256 hash of the event signature.

use crate::domain::entities::Log;
use crate::domain::services::{encode_tuple, event_topic, AbiValue};
use crate::domain::value_objects::{Address, ChoreId, Hash, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// REGISTRY EVENTS
// =============================================================================

/// A registry event. Variant names are the ABI event names.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ChoreEvent {
    /// A parent posted and funded a chore.
    ChoreCreated {
        /// New chore id.
        id: ChoreId,
        /// Posting account.
        parent: Address,
        /// Reward pulled into custody.
        reward: U256,
        /// Reward token.
        token: Address,
    },
    /// A child claimed a chore.
    ChoreAccepted {
        /// Chore id.
        id: ChoreId,
        /// Claiming account.
        child: Address,
    },
    /// The child submitted proof of completion.
    ChoreSubmitted {
        /// Chore id.
        id: ChoreId,
        /// Submitting child.
        child: Address,
        /// Proof reference.
        proof_uri: String,
    },
    /// The parent approved; the reward was paid to the child.
    ChoreApproved {
        /// Chore id.
        id: ChoreId,
        /// Approving parent.
        parent: Address,
        /// Paid child.
        child: Address,
        /// Amount paid.
        reward: U256,
    },
    /// The parent rejected the submission.
    ChoreRejected {
        /// Chore id.
        id: ChoreId,
        /// Rejecting parent.
        parent: Address,
    },
    /// The reward was returned to the parent. Always follows `ChoreRejected`.
    ChoreRefunded {
        /// Chore id.
        id: ChoreId,
        /// Refunded parent.
        parent: Address,
        /// Amount refunded.
        amount: U256,
    },
}

impl ChoreEvent {
    /// ABI event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChoreCreated { .. } => "ChoreCreated",
            Self::ChoreAccepted { .. } => "ChoreAccepted",
            Self::ChoreSubmitted { .. } => "ChoreSubmitted",
            Self::ChoreApproved { .. } => "ChoreApproved",
            Self::ChoreRejected { .. } => "ChoreRejected",
            Self::ChoreRefunded { .. } => "ChoreRefunded",
        }
    }

    /// Canonical signature, the preimage of topic0.
    #[must_use]
    pub fn signature(&self) -> &'static str {
        match self {
            Self::ChoreCreated { .. } => signatures::CHORE_CREATED,
            Self::ChoreAccepted { .. } => signatures::CHORE_ACCEPTED,
            Self::ChoreSubmitted { .. } => signatures::CHORE_SUBMITTED,
            Self::ChoreApproved { .. } => signatures::CHORE_APPROVED,
            Self::ChoreRejected { .. } => signatures::CHORE_REJECTED,
            Self::ChoreRefunded { .. } => signatures::CHORE_REFUNDED,
        }
    }

    /// Keccak-256 of the signature.
    #[must_use]
    pub fn topic0(&self) -> Hash {
        event_topic(self.signature())
    }

    /// Id of the chore the event concerns.
    #[must_use]
    pub fn chore_id(&self) -> ChoreId {
        match self {
            Self::ChoreCreated { id, .. }
            | Self::ChoreAccepted { id, .. }
            | Self::ChoreSubmitted { id, .. }
            | Self::ChoreApproved { id, .. }
            | Self::ChoreRejected { id, .. }
            | Self::ChoreRefunded { id, .. } => *id,
        }
    }

    /// Renders the event as a log emitted by `emitter`.
    #[must_use]
    pub fn to_log(&self, emitter: Address) -> Log {
        let mut topics = vec![self.topic0(), Hash::new(self.chore_id().to_word())];

        let data = match self {
            Self::ChoreCreated {
                parent,
                reward,
                token,
                ..
            } => {
                topics.push(Hash::from(*parent));
                encode_tuple(&[AbiValue::Uint(*reward), AbiValue::Address(*token)])
            }
            Self::ChoreAccepted { child, .. } => {
                topics.push(Hash::from(*child));
                Vec::new()
            }
            Self::ChoreSubmitted {
                child, proof_uri, ..
            } => {
                topics.push(Hash::from(*child));
                encode_tuple(&[AbiValue::String(proof_uri.clone())])
            }
            Self::ChoreApproved {
                parent,
                child,
                reward,
                ..
            } => {
                topics.push(Hash::from(*parent));
                topics.push(Hash::from(*child));
                encode_tuple(&[AbiValue::Uint(*reward)])
            }
            Self::ChoreRejected { parent, .. } => {
                topics.push(Hash::from(*parent));
                Vec::new()
            }
            Self::ChoreRefunded { parent, amount, .. } => {
                topics.push(Hash::from(*parent));
                encode_tuple(&[AbiValue::Uint(*amount)])
            }
        };

        Log::new(emitter, topics, data)
    }
}

/// An event as delivered to sinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    /// Registry-wide emission counter, starting at 1.
    pub sequence: u64,
    /// The event.
    pub event: ChoreEvent,
    /// Log rendering, present when log emission is enabled.
    pub log: Option<Log>,
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// Canonical ABI event signatures.
pub mod signatures {
    /// `ChoreCreated`
    pub const CHORE_CREATED: &str = "ChoreCreated(uint256,address,uint256,address)";
    /// `ChoreAccepted`
    pub const CHORE_ACCEPTED: &str = "ChoreAccepted(uint256,address)";
    /// `ChoreSubmitted`
    pub const CHORE_SUBMITTED: &str = "ChoreSubmitted(uint256,address,string)";
    /// `ChoreApproved`
    pub const CHORE_APPROVED: &str = "ChoreApproved(uint256,address,address,uint256)";
    /// `ChoreRejected`
    pub const CHORE_REJECTED: &str = "ChoreRejected(uint256,address)";
    /// `ChoreRefunded`
    pub const CHORE_REFUNDED: &str = "ChoreRefunded(uint256,address,uint256)";
}

// =============================================================================
// TESTS
// =============================================================================
