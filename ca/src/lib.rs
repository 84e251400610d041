//! Corpact - Corporate-Action Task Engine
//!
//! Corpact merges future-dated corporate-action tasks (snapshots, coupon
//! payments, balance adjustments) from independent producers into one
//! time-ordered backlog and triggers the due portion on demand.
//!
//! # Core Concepts
//!
//! - **One Ordered Backlog**: Tasks from every producer interleave by due
//!   time, with arrival order breaking ties
//! - **Pull, Not Push**: Nothing fires on its own; a controller drains due
//!   tasks explicitly, under a caller-supplied budget
//! - **All-or-Nothing Drains**: A dispatch failure restores every task the
//!   drain removed, so a retry sees the same backlog
//! - **Injected Time**: The engine never reads the wall clock; the service
//!   layer's clock supplies every `now`
//!
//! # Modules
//!
//! - [`domain`] - Task kinds, payload references, and backlog record types
//! - [`producer`] - Adapter trait and registration table
//! - [`scheduler`] - The ordered backlog and drain logic
//! - [`service`] - Actor-based serialized access
//! - [`events`] - Lifecycle event bus and JSONL journal
//! - [`config`] - Configuration types and loading
//! - [`clock`] - Time sources

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod producer;
pub mod scheduler;
pub mod service;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, EventsConfig, ListingConfig, SchedulingConfig, ServiceConfig};
pub use domain::{ActionKind, ActionTask, PayloadRef, QueueError, TaskId, TaskQueue, TaskRecord, Timestamp};
pub use error::EngineError;
pub use events::{
    EngineEvent, EventBus, EventLogEntry, EventLogger, create_event_bus, read_journal, spawn_event_logger,
};
pub use producer::{DispatchError, ProducerAdapter, ProducerRegistry};
pub use scheduler::{ActionScheduler, EngineStats, TaskReceipt, TaskView, TriggerReport};
pub use service::{EngineCommand, EngineService, ServiceError, ServiceResponse};
