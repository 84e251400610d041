//! Engine error types

use taskqueue::{QueueError, TaskId};
use thiserror::Error;

use crate::domain::{ActionKind, Timestamp};
use crate::producer::DispatchError;

/// Errors that can occur during engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No adapter registered for task kind {kind}")]
    UnknownKind { kind: ActionKind },

    #[error("Adapter for kind {kind} registered twice")]
    DuplicateKind { kind: ActionKind },

    #[error("No scheduled task with id {id}")]
    UnknownTask { id: TaskId },

    #[error("Task {id} (due {due_at}) is already due at {now} and can only be drained")]
    AlreadyDue {
        id: TaskId,
        due_at: Timestamp,
        now: Timestamp,
    },

    #[error("Due time {due_at} is in the past (now {now})")]
    InvalidSchedule { due_at: Timestamp, now: Timestamp },

    #[error("Dispatch of task {id} ({kind}) failed")]
    Dispatch {
        id: TaskId,
        kind: ActionKind,
        #[source]
        source: DispatchError,
    },

    #[error("Registry error: {0}")]
    Registry(#[from] QueueError),
}

impl EngineError {
    /// Check if retrying the same call later can succeed
    ///
    /// Only dispatch failures qualify: the drain rolls every affected task
    /// back into the registry, so a later drain sees the same work. The other
    /// variants are caller mistakes or invariant breaches that retrying will
    /// not fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::Dispatch { .. } => true,
            EngineError::UnknownKind { .. } => false,
            EngineError::DuplicateKind { .. } => false,
            EngineError::UnknownTask { .. } => false,
            EngineError::AlreadyDue { .. } => false,
            EngineError::InvalidSchedule { .. } => false,
            EngineError::Registry(_) => false,
        }
    }

    /// Get the task this error is about, if it names one
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            EngineError::UnknownTask { id } => Some(*id),
            EngineError::AlreadyDue { id, .. } => Some(*id),
            EngineError::Dispatch { id, .. } => Some(*id),
            _ => None,
        }
    }
}
