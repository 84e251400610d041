//! Event Bus - central pub/sub system for engine events
//!
//! The EventBus uses tokio broadcast channels to deliver events to all subscribers
//! with minimal latency. The engine emits events, consumers (operator tooling,
//! loggers) subscribe.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use super::types::EngineEvent;

/// Default channel capacity (events)
/// An unbounded drain emits one event per task, so this absorbs a
/// thousand-task backlog in one call without dropping
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Central event bus for engine activity streaming
///
/// Every committed mutation in the engine emits an event to this bus.
/// All consumers (operator tooling, file loggers) subscribe to receive events.
pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
    #[allow(dead_code)]
    channel_capacity: usize,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            channel_capacity: capacity,
        }
    }

    /// Create a new event bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Emit an event to all subscribers
    ///
    /// This is fire-and-forget: if there are no subscribers, the event is dropped.
    /// If the channel is full, oldest events are dropped.
    pub fn emit(&self, event: EngineEvent) {
        debug!(event_type = event.event_type(), "EventBus::emit");
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events
    ///
    /// Returns a receiver that will receive all events emitted after subscription.
    /// Note: Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        debug!("EventBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Create an event bus wrapped in an Arc for shared ownership
pub fn create_event_bus() -> Arc<EventBus> {
    Arc::new(EventBus::with_default_capacity())
}
