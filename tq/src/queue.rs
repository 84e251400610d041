//! Core TaskQueue implementation

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::QueueError;
use crate::record::{TaskId, TaskRecord, Timestamp};

/// Time-ordered task registry
///
/// Tasks from any number of producers merge into one total order: ascending
/// `due_at`, with ties broken by insertion order. The ordering key is
/// `(due_at, id)` and ids are allocated in insertion order, so the key order
/// IS the processing order.
///
/// The hot path only ever removes the head (`pop_earliest`); `remove` by id
/// exists for withdrawal and is a linear scan.
pub struct TaskQueue<K, P> {
    /// Records keyed by `(due_at, id)`, iterated in processing order
    entries: BTreeMap<(Timestamp, TaskId), TaskRecord<K, P>>,

    /// Next id to allocate; never decremented, so ids are never reused
    next_id: u64,
}

impl<K, P> TaskQueue<K, P> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Insert a task, returning its newly allocated id
    ///
    /// Accepts any `due_at`, including one already in the past; whether
    /// backdated insertion is allowed is a policy question for the caller.
    pub fn schedule(&mut self, due_at: Timestamp, kind: K, payload: P) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        debug!(%id, due_at, len = self.entries.len() + 1, "TaskQueue::schedule: inserting");
        self.entries.insert((due_at, id), TaskRecord { id, kind, due_at, payload });
        id
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The record that `pop_earliest` would return, without removing it
    pub fn peek_earliest(&self) -> Option<&TaskRecord<K, P>> {
        self.entries.values().next()
    }

    /// Due time of the earliest pending task
    pub fn next_due_at(&self) -> Option<Timestamp> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// True when at least one task has `due_at <= now`
    ///
    /// A task due exactly at `now` counts as due. Once due, a task stays due
    /// until it is removed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_due_at().map(|due| due <= now).unwrap_or(false)
    }

    /// Remove and return the earliest task
    pub fn pop_earliest(&mut self) -> Result<TaskRecord<K, P>, QueueError> {
        let (_, record) = self.entries.pop_first().ok_or(QueueError::Empty)?;
        debug!(id = %record.id, due_at = record.due_at, remaining = self.entries.len(), "TaskQueue::pop_earliest: removed head");
        Ok(record)
    }

    /// Re-insert a record previously popped from this queue
    ///
    /// The record keeps its original id and therefore its exact position in
    /// the ordering. This is the rollback primitive: a caller that pops a
    /// batch and fails partway restores the popped records and the queue is
    /// indistinguishable from before the batch.
    pub fn restore(&mut self, record: TaskRecord<K, P>) {
        debug_assert!(record.id.0 < self.next_id, "restored record was never issued by this queue");
        debug!(id = %record.id, due_at = record.due_at, "TaskQueue::restore: reinserting");
        self.entries.insert((record.due_at, record.id), record);
    }

    /// Remove a task by id, returning it if present
    ///
    /// Linear scan over the keys; withdrawal is a cold path.
    pub fn remove(&mut self, id: TaskId) -> Option<TaskRecord<K, P>> {
        let key = self.entries.keys().find(|(_, tid)| *tid == id).copied()?;
        debug!(%id, "TaskQueue::remove: removing");
        self.entries.remove(&key)
    }

    /// Iterate pending tasks in processing order (ascending due time)
    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord<K, P>> {
        self.entries.values()
    }

    /// Iterate pending tasks in display order (descending due time)
    pub fn iter_desc(&self) -> impl Iterator<Item = &TaskRecord<K, P>> {
        self.entries.values().rev()
    }

    /// Page through the display ordering
    ///
    /// Latest due time first; within equal due times, later insertions first.
    /// A `start` at or past the end yields an empty page rather than an error,
    /// so repeated reads with the same arguments are idempotent.
    pub fn page_desc(&self, start: usize, limit: usize) -> Vec<&TaskRecord<K, P>> {
        self.entries.values().rev().skip(start).take(limit).collect()
    }
}

impl<K, P> Default for TaskQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
