//! # Domain Services
//!
//! Stateless helpers: Keccak-256 hashing and the subset of Solidity ABI
//! encoding needed to render registry events as logs.

use crate::domain::value_objects::{Address, Hash, U256};
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let hash = Keccak256::digest(data);
    Hash::new(hash.into())
}

/// topic0 of an event with the given canonical signature.
#[must_use]
pub fn event_topic(signature: &str) -> Hash {
    keccak256(signature.as_bytes())
}

// =============================================================================
// ABI ENCODING
// =============================================================================

/// A value in an ABI-encoded tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    /// `uint256`
    Uint(U256),
    /// `address`
    Address(Address),
    /// `string` (dynamic)
    String(String),
}

/// Encodes a `uint256` as a big-endian word.
#[must_use]
pub fn encode_uint(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// ABI-encodes `values` as a tuple (head section followed by tail section).
#[must_use]
pub fn encode_tuple(values: &[AbiValue]) -> Vec<u8> {
    let head_len = values.len() * 32;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        match value {
            AbiValue::Uint(v) => head.extend_from_slice(&encode_uint(*v)),
            AbiValue::Address(a) => head.extend_from_slice(&a.to_word()),
            AbiValue::String(s) => {
                let offset = head_len + tail.len();
                head.extend_from_slice(&encode_uint(U256::from(offset as u64)));
                tail.extend_from_slice(&encode_uint(U256::from(s.len() as u64)));
                tail.extend_from_slice(s.as_bytes());
                let padding = (32 - s.len() % 32) % 32;
                tail.resize(tail.len() + padding, 0);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

// =============================================================================
// TESTS
// =============================================================================
