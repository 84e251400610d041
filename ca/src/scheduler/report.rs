//! Report types for the scheduler

use serde::{Deserialize, Serialize};
use taskqueue::{TaskId, Timestamp};

use crate::domain::{ActionKind, ActionTask, PayloadRef};

/// Read-only snapshot of one pending task, serialized for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub kind: ActionKind,
    pub due_at: Timestamp,
    pub payload: PayloadRef,
}

impl From<&ActionTask> for TaskView {
    fn from(task: &ActionTask) -> Self {
        Self {
            id: task.id,
            kind: task.kind,
            due_at: task.due_at,
            payload: task.payload,
        }
    }
}

/// One committed dispatch within a drain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReceipt {
    pub id: TaskId,
    pub kind: ActionKind,
    pub due_at: Timestamp,
}

/// Outcome of a committed drain call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReport {
    /// Drain identifier shared by this call's events
    pub drain_id: String,

    /// The time the drain ran against
    pub now: Timestamp,

    /// Dispatched tasks, in processing order
    pub receipts: Vec<TaskReceipt>,

    /// Whether due tasks remain (the budget ran out before the backlog did)
    pub more_due: bool,
}

impl TriggerReport {
    /// Number of tasks processed by this drain
    pub fn processed(&self) -> usize {
        self.receipts.len()
    }
}

/// Counters accumulated over the engine's lifetime
#[derive(Debug, Default, Clone)]
pub struct EngineStats {
    pub total_scheduled: u64,
    pub total_processed: u64,
    pub total_withdrawn: u64,
    pub total_aborted_drains: u64,
    pub peak_pending: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_view_from_record() {
        let task = ActionTask {
            id: TaskId::from_raw(3),
            kind: ActionKind::CouponPayment,
            due_at: 18,
            payload: PayloadRef(44),
        };

        let view = TaskView::from(&task);
        assert_eq!(view.id, TaskId::from_raw(3));
        assert_eq!(view.kind, ActionKind::CouponPayment);
        assert_eq!(view.due_at, 18);
        assert_eq!(view.payload, PayloadRef(44));
    }

    #[test]
    fn test_trigger_report_processed() {
        let report = TriggerReport {
            drain_id: "d1".to_string(),
            now: 20,
            receipts: vec![
                TaskReceipt {
                    id: TaskId::from_raw(1),
                    kind: ActionKind::Snapshot,
                    due_at: 6,
                },
                TaskReceipt {
                    id: TaskId::from_raw(2),
                    kind: ActionKind::Snapshot,
                    due_at: 12,
                },
            ],
            more_due: false,
        };

        assert_eq!(report.processed(), 2);
    }

    #[test]
    fn test_task_view_serializes_all_fields() {
        let view = TaskView {
            id: TaskId::from_raw(7),
            kind: ActionKind::BalanceAdjustment,
            due_at: 100,
            payload: PayloadRef(9),
        };

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("balance-adjustment"));
        assert!(json.contains("\"due_at\":100"));
        assert!(json.contains("\"payload\":9"));
    }
}
