//! Time source abstraction
//!
//! Every due check in the engine flows through a [`Clock`] handed in at
//! construction, so tests can pin time exactly instead of racing the wall
//! clock.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::Timestamp;

/// Source of "now" for due checks
pub trait Clock: Send + Sync {
    /// Current engine time
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in Unix epoch seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp().max(0) as Timestamp
    }
}

/// Hand-advanced clock for tests
///
/// Time only moves when [`set`](ManualClock::set) or
/// [`advance`](ManualClock::advance) is called.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock pinned at `now`
    pub fn new(now: Timestamp) -> Self {
        Self { now: AtomicU64::new(now) }
    }

    /// Pin the clock to an absolute time
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::Relaxed);
    }

    /// Move the clock forward by `delta`
    pub fn advance(&self, delta: Timestamp) {
        self.now.fetch_add(delta, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::Relaxed)
    }
}
