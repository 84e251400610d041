//! Engine service messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use taskqueue::{TaskId, Timestamp};

use crate::domain::{ActionKind, PayloadRef};
use crate::error::EngineError;
use crate::scheduler::{EngineStats, TaskView, TriggerReport};

/// Errors from engine service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Channel error")]
    ChannelError,
}

/// Response from engine service operations
pub type ServiceResponse<T> = Result<T, ServiceError>;

/// Commands sent to the EngineService actor
#[derive(Debug)]
pub enum EngineCommand {
    // Scheduling operations
    Schedule {
        due_at: Timestamp,
        kind: ActionKind,
        payload: PayloadRef,
        reply: oneshot::Sender<ServiceResponse<TaskId>>,
    },
    Withdraw {
        id: TaskId,
        reply: oneshot::Sender<ServiceResponse<TaskView>>,
    },

    // Draining operations
    Trigger {
        max_count: u64,
        reply: oneshot::Sender<ServiceResponse<TriggerReport>>,
    },

    // Inspection operations
    Count {
        reply: oneshot::Sender<ServiceResponse<usize>>,
    },
    NextDueAt {
        reply: oneshot::Sender<ServiceResponse<Option<Timestamp>>>,
    },
    IsDue {
        reply: oneshot::Sender<ServiceResponse<bool>>,
    },
    List {
        start: usize,
        limit: usize,
        reply: oneshot::Sender<ServiceResponse<Vec<TaskView>>>,
    },
    Stats {
        reply: oneshot::Sender<ServiceResponse<EngineStats>>,
    },

    // Shutdown
    Shutdown,
}
