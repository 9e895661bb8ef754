use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Predictive preload and maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    /// Routes prefetched per `predictive_preload` call. The first is high priority.
    pub max_candidates: usize,
    /// Interval between memory-management runs (seconds).
    pub maintenance_interval_secs: u64,
}

impl PreloadConfig {
    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs)
    }
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::DEFAULT_MAX_CANDIDATES,
            maintenance_interval_secs: defaults::DEFAULT_MAINTENANCE_INTERVAL_SECS,
        }
    }
}
