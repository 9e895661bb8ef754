use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Priority;

/// How a settled prefetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefetchStatus {
    /// Every task succeeded (or there was nothing to do).
    Completed,
    /// Some tasks failed, at least one succeeded.
    PartiallyFailed,
    /// Every task failed.
    Failed,
    /// The timeout fired before all tasks settled.
    TimedOut,
}

impl PrefetchStatus {
    pub fn is_success(self) -> bool {
        matches!(self, PrefetchStatus::Completed)
    }
}

/// Registry state of a route: `idle` routes are simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefetchState {
    Pending,
    Settled(PrefetchStatus),
}

/// Result of one prefetch attempt, shared by every caller that joined it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefetchOutcome {
    pub route: String,
    pub priority: Priority,
    pub status: PrefetchStatus,
    /// Number of router/data/asset tasks started.
    pub tasks_run: usize,
    /// Number of those tasks that failed.
    pub tasks_failed: usize,
    pub elapsed: Duration,
}

impl PrefetchOutcome {
    /// Derive the status from task counts.
    pub fn from_counts(
        route: impl Into<String>,
        priority: Priority,
        tasks_run: usize,
        tasks_failed: usize,
        elapsed: Duration,
    ) -> Self {
        let status = if tasks_failed == 0 {
            PrefetchStatus::Completed
        } else if tasks_failed >= tasks_run {
            PrefetchStatus::Failed
        } else {
            PrefetchStatus::PartiallyFailed
        };
        Self {
            route: route.into(),
            priority,
            status,
            tasks_run,
            tasks_failed,
            elapsed,
        }
    }

    pub fn timed_out(route: impl Into<String>, priority: Priority, tasks_run: usize, elapsed: Duration) -> Self {
        Self {
            route: route.into(),
            priority,
            status: PrefetchStatus::TimedOut,
            tasks_run,
            tasks_failed: 0,
            elapsed,
        }
    }
}
