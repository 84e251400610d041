//! Time-ordered scheduling of corporate-action tasks
//!
//! Merges tasks from every producer into one due-time-ordered backlog and
//! drains the due portion on demand, with all-or-nothing batch semantics.

mod core;
mod report;

pub use core::ActionScheduler;
pub use report::{EngineStats, TaskReceipt, TaskView, TriggerReport};
