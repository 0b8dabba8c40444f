//! In-Memory Event Log Adapter
//!
//! Implements `EventPublisher` by appending to a vector.

use crate::domain::RaffleEvent;
use crate::ports::outbound::EventPublisher;
use parking_lot::RwLock;
use tracing::trace;

/// Event publisher that keeps every event.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<RaffleEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events in publish order.
    pub fn events(&self) -> Vec<RaffleEvent> {
        self.events.read().clone()
    }

    /// Number of published events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Check if nothing was published.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Remove and return all events.
    pub fn drain(&self) -> Vec<RaffleEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, event: &RaffleEvent) {
        trace!("[raffle] Event {} (cycle {})", event.name(), event.cycle());
        self.events.write().push(event.clone());
    }
}
