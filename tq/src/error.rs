//! Queue error types

use thiserror::Error;

/// Errors from queue operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds no tasks
    ///
    /// Callers that gate removal behind `is_due` or `len` never see this.
    #[error("queue is empty")]
    Empty,
}
