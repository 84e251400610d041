//! Producer adapter contract and registration

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::domain::{ActionKind, ActionTask, PayloadRef};
use crate::error::EngineError;

/// Errors an adapter can report for a due task
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No adapter registered for kind {0}")]
    AdapterMissing(ActionKind),

    #[error("Payload {0} no longer exists on the producer side")]
    PayloadMissing(PayloadRef),

    #[error("Producer failed: {0}")]
    Failed(String),
}

/// Handles due tasks of a single [`ActionKind`]
///
/// The engine invokes `on_due` once per processed task. `Ok` consumes the
/// task. `Err` aborts the surrounding drain and every task popped in it,
/// including ones this or other adapters already acknowledged, returns to
/// the registry for redelivery. Adapters therefore see at-least-once
/// delivery under failure and exactly-once under success, and a partially
/// applied effect must be safe to apply again.
#[async_trait]
pub trait ProducerAdapter: Send + Sync {
    /// The single kind this adapter handles
    fn kind(&self) -> ActionKind;

    /// Apply the effect of a due task
    async fn on_due(&self, task: &ActionTask) -> Result<(), DispatchError>;
}

/// Maps each [`ActionKind`] to its owning adapter
///
/// Built up-front via [`register`](ProducerRegistry::register); the engine
/// takes ownership at construction and the set never changes afterwards.
#[derive(Default)]
pub struct ProducerRegistry {
    adapters: HashMap<ActionKind, Arc<dyn ProducerAdapter>>,
}

impl ProducerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register an adapter under the kind it reports
    pub fn register(&mut self, adapter: Arc<dyn ProducerAdapter>) -> Result<(), EngineError> {
        let kind = adapter.kind();
        debug!(%kind, "ProducerRegistry::register: called");

        if self.adapters.contains_key(&kind) {
            return Err(EngineError::DuplicateKind { kind });
        }
        self.adapters.insert(kind, adapter);
        Ok(())
    }

    /// Get the adapter for a kind
    pub fn get(&self, kind: ActionKind) -> Option<&Arc<dyn ProducerAdapter>> {
        self.adapters.get(&kind)
    }

    /// Check if a kind has an adapter
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.adapters.contains_key(&kind)
    }

    /// Registered kinds
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.adapters.keys().copied().collect()
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Check if no adapters are registered
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
