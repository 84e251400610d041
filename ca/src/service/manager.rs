//! EngineService - actor that owns the ActionScheduler
//!
//! Processes commands via channels so every schedule, withdrawal, and drain
//! runs on a single owner. The injected clock is read here, never below.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use taskqueue::{TaskId, Timestamp};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::domain::{ActionKind, PayloadRef};
use crate::error::EngineError;
use crate::events::{EngineEvent, EventBus};
use crate::producer::ProducerRegistry;
use crate::scheduler::{ActionScheduler, EngineStats, TaskView, TriggerReport};

use super::messages::{EngineCommand, ServiceError, ServiceResponse};

/// Handle to send commands to the EngineService
#[derive(Clone)]
pub struct EngineService {
    tx: mpsc::Sender<EngineCommand>,
    events: Arc<EventBus>,
}

impl EngineService {
    /// Spawn a new EngineService actor
    pub fn spawn(
        config: EngineConfig,
        producers: ProducerRegistry,
        clock: Arc<dyn Clock>,
    ) -> eyre::Result<Self> {
        debug!(producer_count = producers.len(), "spawn: called");
        config.validate()?;

        let events = Arc::new(EventBus::new(config.events.channel_capacity));
        let scheduler = ActionScheduler::new(producers, Arc::clone(&events));

        let (tx, rx) = mpsc::channel(config.service.channel_buffer);

        // Spawn the actor task
        tokio::spawn(actor_loop(scheduler, clock, config, rx));

        info!("EngineService spawned");

        Ok(Self { tx, events })
    }

    /// Subscribe to engine lifecycle events
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// The bus this service emits on (for wiring a journal logger)
    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.events)
    }

    // === Scheduling operations ===

    /// Schedule a task for a future due time
    pub async fn schedule(
        &self,
        due_at: Timestamp,
        kind: ActionKind,
        payload: PayloadRef,
    ) -> ServiceResponse<TaskId> {
        debug!(due_at, %kind, %payload, "schedule: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::Schedule {
                due_at,
                kind,
                payload,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Withdraw a task that has not yet become due
    pub async fn withdraw(&self, id: TaskId) -> ServiceResponse<TaskView> {
        debug!(%id, "withdraw: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::Withdraw { id, reply: reply_tx })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    // === Draining operations ===

    /// Drain due tasks under a budget (`0` means unbounded)
    pub async fn trigger_pending(&self, max_count: u64) -> ServiceResponse<TriggerReport> {
        debug!(max_count, "trigger_pending: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::Trigger {
                max_count,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Drain every due task (alias for an unbounded trigger_pending)
    pub async fn trigger_all_due(&self) -> ServiceResponse<TriggerReport> {
        debug!("trigger_all_due: called");
        self.trigger_pending(0).await
    }

    // === Inspection operations ===

    /// Number of pending tasks
    pub async fn count(&self) -> ServiceResponse<usize> {
        debug!("count: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::Count { reply: reply_tx })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Due time of the earliest pending task, if any
    pub async fn next_due_at(&self) -> ServiceResponse<Option<Timestamp>> {
        debug!("next_due_at: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::NextDueAt { reply: reply_tx })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Whether the earliest pending task is due right now
    pub async fn is_due(&self) -> ServiceResponse<bool> {
        debug!("is_due: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::IsDue { reply: reply_tx })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// List pending tasks, most-future-first
    pub async fn list(&self, start: usize, limit: usize) -> ServiceResponse<Vec<TaskView>> {
        debug!(start, limit, "list: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::List {
                start,
                limit,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Lifetime counters
    pub async fn stats(&self) -> ServiceResponse<EngineStats> {
        debug!("stats: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(EngineCommand::Stats { reply: reply_tx })
            .await
            .map_err(|_| ServiceError::ChannelError)?;
        reply_rx.await.map_err(|_| ServiceError::ChannelError)?
    }

    /// Shutdown the EngineService
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        debug!("shutdown: called");
        self.tx
            .send(EngineCommand::Shutdown)
            .await
            .map_err(|_| ServiceError::ChannelError)
    }
}

/// The actor loop that owns the ActionScheduler and processes commands
async fn actor_loop(
    mut scheduler: ActionScheduler,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    mut rx: mpsc::Receiver<EngineCommand>,
) {
    debug!("actor_loop: called");
    debug!("EngineService actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            EngineCommand::Schedule {
                due_at,
                kind,
                payload,
                reply,
            } => {
                debug!(due_at, %kind, "actor_loop: Schedule command");
                let now = clock.now();
                let result = if config.scheduling.reject_backdated && due_at < now {
                    debug!(due_at, now, "actor_loop: Schedule rejecting backdated task");
                    Err(EngineError::InvalidSchedule { due_at, now }.into())
                } else {
                    scheduler.schedule(due_at, kind, payload).map_err(ServiceError::from)
                };
                let _ = reply.send(result);
            }

            EngineCommand::Withdraw { id, reply } => {
                debug!(%id, "actor_loop: Withdraw command");
                let now = clock.now();
                let result = scheduler.withdraw(id, now).map_err(ServiceError::from);
                let _ = reply.send(result);
            }

            EngineCommand::Trigger { max_count, reply } => {
                debug!(max_count, "actor_loop: Trigger command");
                let now = clock.now();
                // Awaited here, so no other command can interleave mid-drain
                let result = scheduler
                    .trigger_pending(max_count, now)
                    .await
                    .map_err(ServiceError::from);
                let _ = reply.send(result);
            }

            EngineCommand::Count { reply } => {
                debug!("actor_loop: Count command");
                let _ = reply.send(Ok(scheduler.count()));
            }

            EngineCommand::NextDueAt { reply } => {
                debug!("actor_loop: NextDueAt command");
                let _ = reply.send(Ok(scheduler.next_due_at()));
            }

            EngineCommand::IsDue { reply } => {
                debug!("actor_loop: IsDue command");
                let _ = reply.send(Ok(scheduler.is_due(clock.now())));
            }

            EngineCommand::List { start, limit, reply } => {
                debug!(start, limit, "actor_loop: List command");
                let capped = limit.min(config.listing.max_page);
                if capped < limit {
                    debug!(limit, capped, "actor_loop: List capping page size");
                }
                let _ = reply.send(Ok(scheduler.list(start, capped)));
            }

            EngineCommand::Stats { reply } => {
                debug!("actor_loop: Stats command");
                let _ = reply.send(Ok(scheduler.stats()));
            }

            EngineCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("EngineService shutting down");
                break;
            }
        }
    }

    debug!("EngineService actor stopped");
}
