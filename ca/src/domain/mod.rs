mod kind;
mod payload;

pub use kind::ActionKind;
pub use payload::PayloadRef;

// Re-export taskqueue types for convenience
pub use taskqueue::{QueueError, TaskId, TaskQueue, TaskRecord, Timestamp};

/// A scheduled corporate-action task as it lives in the registry
pub type ActionTask = TaskRecord<ActionKind, PayloadRef>;
