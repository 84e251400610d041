//! Event Bus Architecture for Engine Observability
//!
//! This module provides the event system for real-time visibility into
//! scheduling activity. Every committed mutation emits an event. All
//! consumers (journal logger, operator tooling) subscribe to the bus.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       EVENT BUS                              │
//! │            (tokio::sync::broadcast channel)                  │
//! │                                                              │
//! │  Every committed mutation emits. Every consumer subscribes.  │
//! └─────────────────────────────────────────────────────────────┘
//!         ↑                      ↑                      ↑
//!    Scheduling             Withdrawal              Draining
//!    emits:                 emits:                  emits:
//!    - TaskScheduled        - TaskWithdrawn         - TaskTriggered
//!                                                   - DrainCompleted
//!                                                   - DrainAborted
//!
//!         ↓                      ↓                      ↓
//! ┌───────────┐          ┌───────────┐          ┌───────────┐
//! │ Journal   │          │ Operator  │          │ Metrics   │
//! │ .jsonl    │          │ Tooling   │          │ (future)  │
//! └───────────┘          └───────────┘          └───────────┘
//! ```
//!
//! Drain events are withheld until the drain commits: an aborted drain
//! emits a single `DrainAborted` and none of the per-task `TaskTriggered`
//! events, matching the all-or-nothing registry rollback.
//!
//! # Usage
//!
//! ```rust,ignore
//! use corpact::events::{EventBus, EngineEvent};
//! use std::sync::Arc;
//!
//! // Create event bus (typically at app startup)
//! let event_bus = Arc::new(EventBus::with_default_capacity());
//!
//! // Subscribe to events (for journals, dashboards, etc.)
//! let mut rx = event_bus.subscribe();
//! while let Ok(event) = rx.recv().await {
//!     println!("Event: {:?}", event);
//! }
//! ```
//!
//! # Event Types
//!
//! See [`EngineEvent`] for the complete list of events:
//! - Task lifecycle: `TaskScheduled`, `TaskWithdrawn`, `TaskTriggered`
//! - Drain lifecycle: `DrainCompleted`, `DrainAborted`

mod bus;
mod logger;
mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, create_event_bus};
pub use logger::{EventLogger, read_journal, spawn_event_logger};
pub use types::{EngineEvent, EventLogEntry};
