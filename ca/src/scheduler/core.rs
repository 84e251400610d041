//! Scheduler implementation

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use taskqueue::{TaskId, TaskQueue, Timestamp};

use crate::domain::{ActionKind, ActionTask, PayloadRef};
use crate::error::EngineError;
use crate::events::{EngineEvent, EventBus};
use crate::producer::{DispatchError, ProducerRegistry};

use super::report::{EngineStats, TaskReceipt, TaskView, TriggerReport};

/// The ActionScheduler merges future-dated tasks from every producer into one
/// time-ordered backlog and drains the due portion on demand, in order, under
/// a caller-supplied budget.
///
/// All mutation goes through `&mut self`, so a single owner (see the service
/// module) is the concurrency boundary.
pub struct ActionScheduler {
    queue: TaskQueue<ActionKind, PayloadRef>,
    producers: ProducerRegistry,
    events: Arc<EventBus>,
    stats: EngineStats,
}

impl ActionScheduler {
    /// Create a new scheduler over a fixed set of producers
    pub fn new(producers: ProducerRegistry, events: Arc<EventBus>) -> Self {
        debug!(producer_count = producers.len(), "ActionScheduler::new: called");
        Self {
            queue: TaskQueue::new(),
            producers,
            events,
            stats: EngineStats::default(),
        }
    }

    /// Accept a future-dated task into the backlog
    pub fn schedule(
        &mut self,
        due_at: Timestamp,
        kind: ActionKind,
        payload: PayloadRef,
    ) -> Result<TaskId, EngineError> {
        debug!(due_at, %kind, %payload, "ActionScheduler::schedule: called");

        // A task whose kind has no adapter would wedge every later drain, so
        // reject it here instead of at dispatch time
        if !self.producers.contains(kind) {
            warn!(%kind, "ActionScheduler::schedule: no adapter for kind, rejecting");
            return Err(EngineError::UnknownKind { kind });
        }

        let id = self.queue.schedule(due_at, kind, payload);
        self.stats.total_scheduled += 1;
        self.stats.peak_pending = self.stats.peak_pending.max(self.queue.len());

        self.events.emit(EngineEvent::TaskScheduled {
            id,
            kind,
            due_at,
            payload,
        });

        debug!(%id, due_at, "ActionScheduler::schedule: accepted");
        Ok(id)
    }

    /// Number of pending tasks
    pub fn count(&self) -> usize {
        self.queue.len()
    }

    /// Check whether the earliest pending task is due at `now`
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.queue.is_due(now)
    }

    /// Due time of the earliest pending task, if any
    pub fn next_due_at(&self) -> Option<Timestamp> {
        self.queue.next_due_at()
    }

    /// Snapshot of the earliest pending task, if any
    pub fn peek_earliest(&self) -> Option<TaskView> {
        self.queue.peek_earliest().map(TaskView::from)
    }

    /// List pending tasks, most-future-first
    ///
    /// `start` offsets into the descending ordering, `limit` bounds the page.
    /// A `start` beyond the pending count yields an empty page.
    pub fn list(&self, start: usize, limit: usize) -> Vec<TaskView> {
        debug!(start, limit, "ActionScheduler::list: called");
        self.queue
            .page_desc(start, limit)
            .into_iter()
            .map(TaskView::from)
            .collect()
    }

    /// Withdraw a task that has not yet become due
    pub fn withdraw(&mut self, id: TaskId, now: Timestamp) -> Result<TaskView, EngineError> {
        debug!(%id, now, "ActionScheduler::withdraw: called");

        let Some(record) = self.queue.remove(id) else {
            debug!(%id, "ActionScheduler::withdraw: no such task");
            return Err(EngineError::UnknownTask { id });
        };

        // Due tasks belong to the drain path; put the record back untouched
        if record.due_at <= now {
            debug!(%id, due_at = record.due_at, "ActionScheduler::withdraw: already due, restoring");
            let due_at = record.due_at;
            self.queue.restore(record);
            return Err(EngineError::AlreadyDue { id, due_at, now });
        }

        self.stats.total_withdrawn += 1;
        let view = TaskView::from(&record);
        self.events.emit(EngineEvent::TaskWithdrawn {
            id: record.id,
            kind: record.kind,
            due_at: record.due_at,
        });

        debug!(%id, "ActionScheduler::withdraw: removed");
        Ok(view)
    }

    /// Drain due tasks in order, dispatching each to its producer
    ///
    /// `max_count = 0` means no budget: process every task due at `now`.
    /// Pops are provisional until the whole call succeeds; on any dispatch
    /// failure the entire batch, earlier successes included, is restored and
    /// the error is returned. Per-task events are withheld until commit.
    pub async fn trigger_pending(
        &mut self,
        max_count: u64,
        now: Timestamp,
    ) -> Result<TriggerReport, EngineError> {
        let drain_id = Uuid::now_v7().to_string();
        debug!(%drain_id, max_count, now, "ActionScheduler::trigger_pending: called");

        let mut popped: Vec<ActionTask> = Vec::new();
        let mut receipts: Vec<TaskReceipt> = Vec::new();

        loop {
            if max_count != 0 && receipts.len() as u64 >= max_count {
                debug!(%drain_id, "ActionScheduler::trigger_pending: budget exhausted");
                break;
            }
            if !self.queue.is_due(now) {
                debug!(%drain_id, "ActionScheduler::trigger_pending: no more due tasks");
                break;
            }

            let task = match self.queue.pop_earliest() {
                Ok(task) => task,
                Err(err) => {
                    // Unreachable while is_due gates the pop; restore anyway
                    // so no task is ever lost
                    self.restore_batch(popped);
                    return Err(err.into());
                }
            };

            let adapter = match self.producers.get(task.kind) {
                Some(adapter) => Arc::clone(adapter),
                None => {
                    let missing = DispatchError::AdapterMissing(task.kind);
                    return Err(self.abort_drain(drain_id, now, popped, task, missing));
                }
            };

            match adapter.on_due(&task).await {
                Ok(()) => {
                    debug!(%drain_id, id = %task.id, kind = %task.kind, "ActionScheduler::trigger_pending: dispatched");
                    receipts.push(TaskReceipt {
                        id: task.id,
                        kind: task.kind,
                        due_at: task.due_at,
                    });
                    popped.push(task);
                }
                Err(source) => {
                    return Err(self.abort_drain(drain_id, now, popped, task, source));
                }
            }
        }

        let processed = receipts.len();
        let more_due = self.queue.is_due(now);
        self.stats.total_processed += processed as u64;

        // Commit point: removals stand, so the withheld events go out
        for receipt in &receipts {
            self.events.emit(EngineEvent::TaskTriggered {
                drain_id: drain_id.clone(),
                id: receipt.id,
                kind: receipt.kind,
                due_at: receipt.due_at,
            });
        }
        self.events.emit(EngineEvent::DrainCompleted {
            drain_id: drain_id.clone(),
            now,
            processed,
            more_due,
        });

        debug!(%drain_id, processed, more_due, "ActionScheduler::trigger_pending: drain committed");
        Ok(TriggerReport {
            drain_id,
            now,
            receipts,
            more_due,
        })
    }

    /// Drain every task due at `now`, without a budget
    pub async fn trigger_all_due(&mut self, now: Timestamp) -> Result<TriggerReport, EngineError> {
        self.trigger_pending(0, now).await
    }

    /// Lifetime counters
    pub fn stats(&self) -> EngineStats {
        self.stats.clone()
    }

    /// Undo a failed drain: every popped task goes back, the failed one
    /// included, and the abort is the only event that escapes
    fn abort_drain(
        &mut self,
        drain_id: String,
        now: Timestamp,
        mut popped: Vec<ActionTask>,
        failed: ActionTask,
        source: DispatchError,
    ) -> EngineError {
        let id = failed.id;
        let kind = failed.kind;
        warn!(%drain_id, %id, %kind, error = %source, "ActionScheduler::trigger_pending: dispatch failed, rolling back batch");

        popped.push(failed);
        let rolled_back = popped.len();
        self.restore_batch(popped);
        self.stats.total_aborted_drains += 1;

        self.events.emit(EngineEvent::DrainAborted {
            drain_id,
            now,
            failed_task: id,
            kind,
            rolled_back,
            reason: source.to_string(),
        });

        EngineError::Dispatch { id, kind, source }
    }

    fn restore_batch(&mut self, batch: Vec<ActionTask>) {
        for task in batch {
            self.queue.restore(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::create_event_bus;
    use crate::producer::ProducerAdapter;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::broadcast::error::TryRecvError;

    /// Records every dispatch it receives, in order
    struct RecordingAdapter {
        kind: ActionKind,
        log: Arc<Mutex<Vec<(ActionKind, TaskId)>>>,
    }

    #[async_trait]
    impl ProducerAdapter for RecordingAdapter {
        fn kind(&self) -> ActionKind {
            self.kind
        }

        async fn on_due(&self, task: &ActionTask) -> Result<(), DispatchError> {
            self.log.lock().unwrap().push((self.kind, task.id));
            Ok(())
        }
    }

    /// Fails the first `failures` dispatches, then succeeds
    struct FlakyAdapter {
        kind: ActionKind,
        failures_left: AtomicUsize,
        calls: AtomicUsize,
    }

    impl FlakyAdapter {
        fn new(kind: ActionKind, failures: usize) -> Arc<Self> {
            Arc::new(Self {
                kind,
                failures_left: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProducerAdapter for FlakyAdapter {
        fn kind(&self) -> ActionKind {
            self.kind
        }

        async fn on_due(&self, _task: &ActionTask) -> Result<(), DispatchError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            let left = self.failures_left.load(Ordering::Relaxed);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::Relaxed);
                return Err(DispatchError::Failed("transient ledger failure".to_string()));
            }
            Ok(())
        }
    }

    fn shared_log() -> Arc<Mutex<Vec<(ActionKind, TaskId)>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn recording(kind: ActionKind, log: &Arc<Mutex<Vec<(ActionKind, TaskId)>>>) -> Arc<RecordingAdapter> {
        Arc::new(RecordingAdapter {
            kind,
            log: Arc::clone(log),
        })
    }

    /// Scheduler with recording adapters for all three kinds, sharing one log
    fn full_scheduler(log: &Arc<Mutex<Vec<(ActionKind, TaskId)>>>) -> ActionScheduler {
        let mut producers = ProducerRegistry::new();
        producers.register(recording(ActionKind::Snapshot, log)).unwrap();
        producers.register(recording(ActionKind::CouponPayment, log)).unwrap();
        producers.register(recording(ActionKind::BalanceAdjustment, log)).unwrap();
        ActionScheduler::new(producers, create_event_bus())
    }

    #[test]
    fn test_schedule_assigns_increasing_ids() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let a = scheduler.schedule(12, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        let b = scheduler.schedule(18, ActionKind::Snapshot, PayloadRef(2)).unwrap();
        let c = scheduler.schedule(6, ActionKind::Snapshot, PayloadRef(3)).unwrap();

        assert!(a < b);
        assert!(b < c);
        assert_eq!(scheduler.count(), 3);
    }

    #[test]
    fn test_schedule_unknown_kind_rejected() {
        let log = shared_log();
        let mut producers = ProducerRegistry::new();
        producers.register(recording(ActionKind::Snapshot, &log)).unwrap();
        let mut scheduler = ActionScheduler::new(producers, create_event_bus());

        let err = scheduler
            .schedule(10, ActionKind::CouponPayment, PayloadRef(1))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownKind {
                kind: ActionKind::CouponPayment
            }
        ));
        assert_eq!(scheduler.count(), 0);
    }

    #[tokio::test]
    async fn test_trigger_processes_only_due() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        scheduler.schedule(12, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        scheduler.schedule(18, ActionKind::Snapshot, PayloadRef(2)).unwrap();
        let early = scheduler.schedule(6, ActionKind::Snapshot, PayloadRef(3)).unwrap();
        assert_eq!(scheduler.count(), 3);

        let report = scheduler.trigger_pending(0, 7).await.unwrap();

        assert_eq!(report.processed(), 1);
        assert_eq!(report.receipts[0].id, early);
        assert_eq!(report.receipts[0].due_at, 6);
        assert!(!report.more_due);
        assert_eq!(scheduler.count(), 2);
    }

    #[tokio::test]
    async fn test_trigger_budget_respected_across_calls() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        scheduler.schedule(12, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        scheduler.schedule(18, ActionKind::Snapshot, PayloadRef(2)).unwrap();
        scheduler.schedule(6, ActionKind::Snapshot, PayloadRef(3)).unwrap();

        scheduler.trigger_pending(0, 7).await.unwrap();

        // Budget of one at now=20 takes the earliest remaining task only
        let report = scheduler.trigger_pending(1, 20).await.unwrap();
        assert_eq!(report.processed(), 1);
        assert_eq!(report.receipts[0].due_at, 12);
        assert!(report.more_due);
        assert_eq!(scheduler.count(), 1);

        // An oversized budget drains what is left
        let report = scheduler.trigger_pending(100, 20).await.unwrap();
        assert_eq!(report.processed(), 1);
        assert_eq!(report.receipts[0].due_at, 18);
        assert!(!report.more_due);
        assert_eq!(scheduler.count(), 0);
    }

    #[tokio::test]
    async fn test_trigger_nothing_due() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        scheduler.schedule(100, ActionKind::Snapshot, PayloadRef(1)).unwrap();

        let report = scheduler.trigger_pending(0, 50).await.unwrap();
        assert_eq!(report.processed(), 0);
        assert!(!report.more_due);
        assert_eq!(scheduler.count(), 1);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_on_empty_backlog() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let report = scheduler.trigger_all_due(1_000).await.unwrap();
        assert_eq!(report.processed(), 0);
    }

    #[tokio::test]
    async fn test_tie_break_dispatches_in_insertion_order() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let first = scheduler.schedule(5, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        let second = scheduler.schedule(5, ActionKind::CouponPayment, PayloadRef(2)).unwrap();

        scheduler.trigger_pending(0, 5).await.unwrap();

        let calls = log.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(ActionKind::Snapshot, first), (ActionKind::CouponPayment, second)]
        );
    }

    #[tokio::test]
    async fn test_cross_kind_order_follows_due_time() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let late = scheduler.schedule(11, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        let early = scheduler.schedule(10, ActionKind::BalanceAdjustment, PayloadRef(2)).unwrap();

        scheduler.trigger_all_due(20).await.unwrap();

        let calls = log.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                (ActionKind::BalanceAdjustment, early),
                (ActionKind::Snapshot, late)
            ]
        );
    }

    #[tokio::test]
    async fn test_exactly_once_on_success() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let ids: Vec<TaskId> = (0..5)
            .map(|i| {
                scheduler
                    .schedule(10 + i, ActionKind::CouponPayment, PayloadRef(i))
                    .unwrap()
            })
            .collect();

        scheduler.trigger_all_due(100).await.unwrap();

        let calls = log.lock().unwrap();
        let called_ids: Vec<TaskId> = calls.iter().map(|(_, id)| *id).collect();
        assert_eq!(called_ids, ids);
        assert_eq!(scheduler.count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_failure_rolls_back_whole_batch() {
        let log = shared_log();
        let flaky = FlakyAdapter::new(ActionKind::BalanceAdjustment, 1);

        let mut producers = ProducerRegistry::new();
        producers.register(recording(ActionKind::Snapshot, &log)).unwrap();
        producers.register(flaky.clone()).unwrap();
        let mut scheduler = ActionScheduler::new(producers, create_event_bus());

        let ok_id = scheduler.schedule(5, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        let bad_id = scheduler.schedule(6, ActionKind::BalanceAdjustment, PayloadRef(2)).unwrap();
        let tail_id = scheduler.schedule(7, ActionKind::Snapshot, PayloadRef(3)).unwrap();

        let before: Vec<TaskId> = scheduler.list(0, 10).iter().map(|v| v.id).collect();

        let err = scheduler.trigger_pending(0, 10).await.unwrap_err();
        assert!(matches!(err, EngineError::Dispatch { id, .. } if id == bad_id));
        assert!(err.is_recoverable());

        // Everything popped in the failed drain is back, first success included
        assert_eq!(scheduler.count(), 3);
        let after: Vec<TaskId> = scheduler.list(0, 10).iter().map(|v| v.id).collect();
        assert_eq!(before, after);

        // The snapshot adapter did run once before the abort
        assert_eq!(log.lock().unwrap().len(), 1);

        // Retry succeeds and redelivers the first task (at-least-once under failure)
        let report = scheduler.trigger_pending(0, 10).await.unwrap();
        assert_eq!(report.processed(), 3);
        assert_eq!(
            report.receipts.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![ok_id, bad_id, tail_id]
        );
        assert_eq!(flaky.calls.load(Ordering::Relaxed), 2);
        assert_eq!(log.lock().unwrap().len(), 3);
        assert_eq!(scheduler.count(), 0);
    }

    #[tokio::test]
    async fn test_bounded_calls_match_one_unbounded_call() {
        let due_times = [40u64, 10, 10, 30, 20, 40, 5];

        let log_a = shared_log();
        let mut unbounded = full_scheduler(&log_a);
        for (i, &due) in due_times.iter().enumerate() {
            unbounded.schedule(due, ActionKind::Snapshot, PayloadRef(i as u64)).unwrap();
        }
        let full = unbounded.trigger_pending(0, 100).await.unwrap();

        let log_b = shared_log();
        let mut bounded = full_scheduler(&log_b);
        for (i, &due) in due_times.iter().enumerate() {
            bounded.schedule(due, ActionKind::Snapshot, PayloadRef(i as u64)).unwrap();
        }
        let mut stepped: Vec<TaskReceipt> = Vec::new();
        loop {
            let report = bounded.trigger_pending(2, 100).await.unwrap();
            let done = report.processed() == 0;
            stepped.extend(report.receipts);
            if done {
                break;
            }
        }

        assert_eq!(full.receipts, stepped);
        assert_eq!(bounded.count(), 0);
    }

    #[tokio::test]
    async fn test_events_withheld_until_commit() {
        let flaky = FlakyAdapter::new(ActionKind::Snapshot, 1);
        let mut producers = ProducerRegistry::new();
        producers.register(flaky).unwrap();

        let bus = create_event_bus();
        let mut rx = bus.subscribe();
        let mut scheduler = ActionScheduler::new(producers, bus);

        scheduler.schedule(5, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        assert_eq!(rx.recv().await.unwrap().event_type(), "TaskScheduled");

        // Failed drain: the abort is the only event that escapes
        scheduler.trigger_pending(0, 10).await.unwrap_err();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "DrainAborted");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        // Successful drain: per-task event, then the completion marker
        scheduler.trigger_pending(0, 10).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().event_type(), "TaskTriggered");
        assert_eq!(rx.recv().await.unwrap().event_type(), "DrainCompleted");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_withdraw_future_task() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let id = scheduler.schedule(100, ActionKind::CouponPayment, PayloadRef(1)).unwrap();

        let view = scheduler.withdraw(id, 50).unwrap();
        assert_eq!(view.id, id);
        assert_eq!(scheduler.count(), 0);

        // Withdrawn tasks never reach their adapter
        scheduler.trigger_all_due(200).await.unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_withdraw_due_task_rejected() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let id = scheduler.schedule(40, ActionKind::Snapshot, PayloadRef(1)).unwrap();

        let err = scheduler.withdraw(id, 40).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyDue { due_at: 40, now: 40, .. }));
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_withdraw_unknown_task() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        let err = scheduler.withdraw(TaskId::from_raw(99), 10).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTask { .. }));
    }

    #[test]
    fn test_list_is_descending_and_pageable() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        scheduler.schedule(12, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        scheduler.schedule(18, ActionKind::CouponPayment, PayloadRef(2)).unwrap();
        scheduler.schedule(6, ActionKind::BalanceAdjustment, PayloadRef(3)).unwrap();

        let page = scheduler.list(0, 10);
        let due_times: Vec<Timestamp> = page.iter().map(|v| v.due_at).collect();
        assert_eq!(due_times, vec![18, 12, 6]);

        // Same call twice with no mutation in between is identical
        assert_eq!(scheduler.list(0, 10), page);

        let tail = scheduler.list(1, 1);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].due_at, 12);

        assert!(scheduler.list(3, 10).is_empty());
        assert!(scheduler.list(100, 10).is_empty());
    }

    #[tokio::test]
    async fn test_stats_tracking() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        scheduler.schedule(5, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        scheduler.schedule(6, ActionKind::Snapshot, PayloadRef(2)).unwrap();
        let keep = scheduler.schedule(100, ActionKind::Snapshot, PayloadRef(3)).unwrap();

        scheduler.trigger_all_due(10).await.unwrap();
        scheduler.withdraw(keep, 10).unwrap();

        let stats = scheduler.stats();
        assert_eq!(stats.total_scheduled, 3);
        assert_eq!(stats.total_processed, 2);
        assert_eq!(stats.total_withdrawn, 1);
        assert_eq!(stats.total_aborted_drains, 0);
        assert_eq!(stats.peak_pending, 3);
    }

    #[tokio::test]
    async fn test_peek_and_next_due_track_the_head() {
        let log = shared_log();
        let mut scheduler = full_scheduler(&log);

        assert!(scheduler.peek_earliest().is_none());
        assert_eq!(scheduler.next_due_at(), None);

        scheduler.schedule(12, ActionKind::Snapshot, PayloadRef(1)).unwrap();
        scheduler.schedule(6, ActionKind::CouponPayment, PayloadRef(2)).unwrap();

        assert_eq!(scheduler.next_due_at(), Some(6));
        assert_eq!(scheduler.peek_earliest().unwrap().due_at, 6);
        assert!(!scheduler.is_due(5));
        assert!(scheduler.is_due(6));

        scheduler.trigger_all_due(6).await.unwrap();
        assert_eq!(scheduler.next_due_at(), Some(12));
    }
}
