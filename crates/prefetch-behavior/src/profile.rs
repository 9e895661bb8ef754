//! BehaviorProfile: one user's navigation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prefetch_core::constants::COMMON_PATHS_RETAINED;
use prefetch_core::models::{DeviceInfo, VisitRecord};

use crate::frequency;

/// Per-user aggregate: visits in arrival order, derived top paths, and the
/// device snapshot taken when the profile was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub user_id: String,
    pub visits: Vec<VisitRecord>,
    /// Top paths, refreshed after every recorded visit.
    pub common_paths: Vec<String>,
    pub device: DeviceInfo,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl BehaviorProfile {
    pub fn new(user_id: impl Into<String>, device: DeviceInfo) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            visits: Vec::new(),
            common_paths: Vec::new(),
            device,
            created_at: now,
            last_activity: now,
        }
    }

    /// Append a visit, dropping the oldest ones beyond `max_visits`.
    pub fn push_visit(&mut self, visit: VisitRecord, max_visits: usize) {
        self.last_activity = self.last_activity.max(visit.timestamp);
        self.visits.push(visit);
        if self.visits.len() > max_visits {
            let overflow = self.visits.len() - max_visits;
            self.visits.drain(..overflow);
        }
        self.refresh_common_paths();
    }

    /// Drop visits with `now - timestamp >= max_age`. Returns how many were removed.
    pub fn retain_recent(&mut self, max_age: chrono::Duration, now: DateTime<Utc>) -> usize {
        let before = self.visits.len();
        self.visits.retain(|v| v.age(now) < max_age);
        let removed = before - self.visits.len();
        if removed > 0 {
            self.refresh_common_paths();
        }
        removed
    }

    /// Up to `k` most visited paths; see [`frequency::rank_paths`] for ordering.
    pub fn common_paths(&self, k: usize) -> Vec<String> {
        frequency::top_paths(&self.visits, k)
    }

    pub fn last_visit(&self) -> Option<&VisitRecord> {
        self.visits.last()
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    fn refresh_common_paths(&mut self) {
        self.common_paths = frequency::top_paths(&self.visits, COMMON_PATHS_RETAINED);
    }
}
