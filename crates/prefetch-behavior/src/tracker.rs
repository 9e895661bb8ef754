//! BehaviorTracker: concurrent per-user behavior profiles via DashMap.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use prefetch_core::config::BehaviorConfig;
use prefetch_core::models::{DeviceInfo, VisitRecord};

use crate::frequency::{self, PathFrequency};
use crate::profile::BehaviorProfile;

/// Thread-safe store of behavior profiles keyed by user id.
///
/// Recording is best effort: missing user ids and empty paths are ignored
/// without error.
#[derive(Clone)]
pub struct BehaviorTracker {
    profiles: Arc<DashMap<String, BehaviorProfile>>,
    config: BehaviorConfig,
}

impl BehaviorTracker {
    pub fn new(config: BehaviorConfig) -> Self {
        Self {
            profiles: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Create the user's profile with `device` if it does not exist yet.
    pub fn ensure_profile(&self, user_id: &str, device: DeviceInfo) {
        if user_id.is_empty() {
            return;
        }
        self.profiles
            .entry(user_id.to_string())
            .or_insert_with(|| BehaviorProfile::new(user_id, device));
    }

    /// Record a navigation to `path` at the current time.
    pub fn record_visit(&self, user_id: &str, path: &str, referrer: Option<&str>) -> bool {
        self.record_visit_at(user_id, path, referrer, Utc::now())
    }

    /// Record a navigation with an explicit timestamp.
    ///
    /// Returns `false` when the visit was ignored (empty user id or path).
    pub fn record_visit_at(
        &self,
        user_id: &str,
        path: &str,
        referrer: Option<&str>,
        at: DateTime<Utc>,
    ) -> bool {
        if user_id.is_empty() || path.is_empty() {
            trace!(user_id, path, "ignoring visit without user or path");
            return false;
        }
        let visit = VisitRecord::new(path, at, referrer.map(String::from));
        let mut profile = self
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| BehaviorProfile::new(user_id, DeviceInfo::default()));
        profile.push_visit(visit, self.config.max_visits_per_user);
        debug!(user_id, path, visits = profile.visit_count(), "recorded visit");
        true
    }

    /// Up to `k` most-visited paths for the user, most recent occurrence
    /// first among equal counts. Unknown users yield an empty list.
    pub fn common_paths(&self, user_id: &str, k: usize) -> Vec<String> {
        self.profiles
            .get(user_id)
            .map(|p| p.common_paths(k))
            .unwrap_or_default()
    }

    /// Full ranking with counts for the user.
    pub fn path_frequencies(&self, user_id: &str) -> Vec<PathFrequency> {
        self.profiles
            .get(user_id)
            .map(|p| frequency::rank_paths(&p.visits))
            .unwrap_or_default()
    }

    /// Visit history for the user (cloned snapshot).
    pub fn visits(&self, user_id: &str) -> Vec<VisitRecord> {
        self.profiles
            .get(user_id)
            .map(|p| p.visits.clone())
            .unwrap_or_default()
    }

    /// Profile snapshot for the user.
    pub fn profile(&self, user_id: &str) -> Option<BehaviorProfile> {
        self.profiles.get(user_id).map(|p| p.clone())
    }

    pub fn has_profile(&self, user_id: &str) -> bool {
        self.profiles.contains_key(user_id)
    }

    /// Remove visits older than `max_age` from every profile.
    /// Returns the number of visits removed.
    pub fn purge_older_than(&self, max_age: chrono::Duration, now: DateTime<Utc>) -> usize {
        self.profiles
            .iter_mut()
            .map(|mut entry| entry.retain_recent(max_age, now))
            .sum()
    }

    /// Profiles that currently hold no visits.
    pub fn empty_profile_count(&self) -> usize {
        self.profiles.iter().filter(|p| p.visits.is_empty()).count()
    }

    pub fn remove_user(&self, user_id: &str) -> Option<BehaviorProfile> {
        self.profiles.remove(user_id).map(|(_, v)| v)
    }

    pub fn user_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn user_ids(&self) -> Vec<String> {
        self.profiles.iter().map(|r| r.key().clone()).collect()
    }

    pub fn clear(&self) {
        self.profiles.clear();
    }
}

impl Default for BehaviorTracker {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}
