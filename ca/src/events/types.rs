//! Event types for engine activity streaming
//!
//! These events represent all observable activity in the engine:
//! - Task lifecycle (scheduled, withdrawn, triggered)
//! - Drain lifecycle (completed, aborted)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskqueue::{TaskId, Timestamp};

use crate::domain::{ActionKind, PayloadRef};

/// Core event enum - the vocabulary of engine activity
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    // === Task Lifecycle ===
    /// A task has been accepted into the registry
    TaskScheduled {
        id: TaskId,
        kind: ActionKind,
        due_at: Timestamp,
        payload: PayloadRef,
    },
    /// A task has been withdrawn before becoming due
    TaskWithdrawn {
        id: TaskId,
        kind: ActionKind,
        due_at: Timestamp,
    },
    /// A due task has been dispatched and its removal committed
    TaskTriggered {
        drain_id: String,
        id: TaskId,
        kind: ActionKind,
        due_at: Timestamp,
    },

    // === Drain Lifecycle ===
    /// A drain call has finished and its removals are committed
    DrainCompleted {
        drain_id: String,
        now: Timestamp,
        processed: usize,
        /// Whether due tasks remain (budget ran out before the backlog did)
        more_due: bool,
    },
    /// A drain call has failed and every task popped in it was put back
    DrainAborted {
        drain_id: String,
        now: Timestamp,
        failed_task: TaskId,
        kind: ActionKind,
        /// Tasks returned to the registry, the failed one included
        rolled_back: usize,
        reason: String,
    },
}

impl EngineEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::TaskScheduled { .. } => "TaskScheduled",
            EngineEvent::TaskWithdrawn { .. } => "TaskWithdrawn",
            EngineEvent::TaskTriggered { .. } => "TaskTriggered",
            EngineEvent::DrainCompleted { .. } => "DrainCompleted",
            EngineEvent::DrainAborted { .. } => "DrainAborted",
        }
    }

    /// Get the task this event is about, if it names one
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            EngineEvent::TaskScheduled { id, .. }
            | EngineEvent::TaskWithdrawn { id, .. }
            | EngineEvent::TaskTriggered { id, .. } => Some(*id),
            EngineEvent::DrainAborted { failed_task, .. } => Some(*failed_task),
            EngineEvent::DrainCompleted { .. } => None,
        }
    }

    /// Get the drain this event belongs to, if any
    pub fn drain_id(&self) -> Option<&str> {
        match self {
            EngineEvent::TaskTriggered { drain_id, .. }
            | EngineEvent::DrainCompleted { drain_id, .. }
            | EngineEvent::DrainAborted { drain_id, .. } => Some(drain_id),
            EngineEvent::TaskScheduled { .. } | EngineEvent::TaskWithdrawn { .. } => None,
        }
    }
}

/// A timestamped event log entry for file persistence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Timestamp of the event
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// The event
    pub event: EngineEvent,
}

impl EventLogEntry {
    /// Create a new log entry with current timestamp
    pub fn new(event: EngineEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}
