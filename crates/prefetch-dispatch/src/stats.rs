//! Dispatcher counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use prefetch_core::models::PrefetchStatus;

#[derive(Debug, Default)]
pub struct DispatchStats {
    started: AtomicU64,
    deduplicated: AtomicU64,
    completed: AtomicU64,
    partially_failed: AtomicU64,
    failed: AtomicU64,
    timed_out: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStatsSnapshot {
    pub started: u64,
    pub deduplicated: u64,
    pub completed: u64,
    pub partially_failed: u64,
    pub failed: u64,
    pub timed_out: u64,
}

impl DispatchStats {
    pub fn record_started(&self) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_settled(&self, status: PrefetchStatus) {
        let counter = match status {
            PrefetchStatus::Completed => &self.completed,
            PrefetchStatus::PartiallyFailed => &self.partially_failed,
            PrefetchStatus::Failed => &self.failed,
            PrefetchStatus::TimedOut => &self.timed_out,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            started: self.started.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            partially_failed: self.partially_failed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

impl DispatchStatsSnapshot {
    /// Attempts that have settled, in any state.
    pub fn settled(&self) -> u64 {
        self.completed + self.partially_failed + self.failed + self.timed_out
    }
}
