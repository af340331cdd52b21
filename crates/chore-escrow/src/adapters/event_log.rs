//! Event sinks.
//!
//! - [`InMemoryEventLog`]: append-only history, queryable by chore id
//! - [`BroadcastEventSink`]: live stream over `tokio::sync::broadcast`

use crate::domain::entities::Log;
use crate::domain::value_objects::ChoreId;
use crate::events::{ChoreEvent, EmittedEvent};
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

/// Default broadcast channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

// =============================================================================
// IN-MEMORY LOG
// =============================================================================

/// Append-only record of every emitted event.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    entries: RwLock<Vec<EmittedEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All delivered events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<ChoreEvent> {
        self.entries.read().iter().map(|e| e.event.clone()).collect()
    }

    /// All rendered logs, in emission order.
    #[must_use]
    pub fn logs(&self) -> Vec<Log> {
        self.entries
            .read()
            .iter()
            .filter_map(|e| e.log.clone())
            .collect()
    }

    /// Events concerning chore `id`, in emission order.
    #[must_use]
    pub fn events_for(&self, id: ChoreId) -> Vec<ChoreEvent> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.event.chore_id() == id)
            .map(|e| e.event.clone())
            .collect()
    }

    /// Full entries including sequence numbers.
    #[must_use]
    pub fn entries(&self) -> Vec<EmittedEvent> {
        self.entries.read().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Serialises the history as a JSON array.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.entries.read())
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&self, event: &EmittedEvent) {
        self.entries.write().push(event.clone());
    }
}

// =============================================================================
// BROADCAST SINK
// =============================================================================

/// Fans events out to any number of async subscribers.
///
/// Slow subscribers lag and lose the oldest events; emission never blocks.
#[derive(Debug)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<EmittedEvent>,
    delivered: AtomicU64,
}

impl BroadcastEventSink {
    /// Create a sink with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a sink with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            delivered: AtomicU64::new(0),
        }
    }

    /// Subscribe to events emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EmittedEvent> {
        self.sender.subscribe()
    }

    /// Current subscriber count.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events that reached at least one subscriber.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, event: &EmittedEvent) {
        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
                trace!(receivers, sequence = event.sequence, "event broadcast");
            }
            Err(_) => trace!(sequence = event.sequence, "no subscribers, event dropped"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
