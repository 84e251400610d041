//! TaskQueue - generic time-ordered task registry
//!
//! Multiple independent producers schedule future-dated tasks into one shared
//! queue, which merges them into a single globally ordered sequence:
//!
//! ```text
//! ordering key:  (due_at, id)
//!   - primary:   due_at ascending (earliest first)
//!   - tiebreak:  id ascending (insertion order, ids are monotonic)
//! ```
//!
//! The queue is a plain `&mut self` data structure with no interior locking
//! and no clock of its own; callers pass `now` explicitly and own the
//! mutual-exclusion boundary.
//!
//! # Example
//!
//! ```
//! use taskqueue::TaskQueue;
//!
//! let mut queue = TaskQueue::new();
//! queue.schedule(12, "snapshot", 1u64);
//! queue.schedule(6, "coupon-payment", 2u64);
//!
//! assert!(queue.is_due(7));
//! let record = queue.pop_earliest().unwrap();
//! assert_eq!(record.due_at, 6);
//! ```

mod error;
mod queue;
mod record;

pub use error::QueueError;
pub use queue::TaskQueue;
pub use record::{TaskId, TaskRecord, Timestamp};
