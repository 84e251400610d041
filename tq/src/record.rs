//! Task record types

use serde::{Deserialize, Serialize};

/// Scheduling time in caller-defined units
///
/// The queue never interprets timestamps beyond ordering them, so callers
/// pick the unit (unix seconds, millis, a logical tick counter) and use it
/// consistently for both `due_at` and `now`.
pub type Timestamp = u64;

/// Unique identifier for a scheduled task
///
/// Ids are allocated by the owning [`TaskQueue`](crate::TaskQueue) in strictly
/// increasing order and are never reused, even after a task is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub(crate) u64);

impl TaskId {
    /// Raw numeric value of this id
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Reconstruct an id from its raw value
    ///
    /// Intended for deserialized data and tests. Ids handed to a live queue
    /// should come from that queue's [`schedule`](crate::TaskQueue::schedule).
    pub const fn from_raw(value: u64) -> Self {
        TaskId(value)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single scheduled task
///
/// Records are immutable once created: a record enters the queue via
/// `schedule` and leaves exactly once, either popped for processing or
/// removed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord<K, P> {
    /// Queue-assigned id, unique for the lifetime of the queue
    pub id: TaskId,
    /// Producer tag identifying who handles this task when due
    pub kind: K,
    /// When the task becomes eligible for processing
    pub due_at: Timestamp,
    /// Opaque payload handle, meaningful only to the producer
    pub payload: P,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId(42).to_string(), "42");
        assert_eq!(TaskId(42).value(), 42);
    }

    #[test]
    fn test_task_id_ordering() {
        assert!(TaskId(1) < TaskId(2));
        assert_eq!(TaskId(7), TaskId(7));
    }

    #[test]
    fn test_task_record_serde() {
        let record = TaskRecord {
            id: TaskId(3),
            kind: "snapshot".to_string(),
            due_at: 1_700_000_000,
            payload: 99u64,
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: TaskRecord<String, u64> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
        assert!(json.contains("\"id\":3"));
    }
}
