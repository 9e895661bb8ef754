use serde::{Deserialize, Serialize};

use super::defaults;

/// Behavior tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Visits kept per user; the oldest are dropped beyond this.
    pub max_visits_per_user: usize,
    /// Visits older than this are removed by the periodic purge (seconds).
    pub max_visit_age_secs: u64,
}

impl BehaviorConfig {
    /// Saturates at `chrono::Duration::MAX` for values chrono cannot hold.
    pub fn max_visit_age(&self) -> chrono::Duration {
        i64::try_from(self.max_visit_age_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            max_visits_per_user: defaults::DEFAULT_MAX_VISITS_PER_USER,
            max_visit_age_secs: defaults::DEFAULT_MAX_VISIT_AGE_SECS,
        }
    }
}
