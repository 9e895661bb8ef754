//! Time-window purge of old visits.
//!
//! Not self-scheduled: the host calls this on an interval.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::tracker::BehaviorTracker;

/// Result of a purge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgeReport {
    pub visits_removed: usize,
    /// Profiles left without any visits. They are kept so that their
    /// device snapshot survives.
    pub empty_profiles: usize,
}

/// Remove visits older than the tracker's configured max age.
pub fn purge_stale_visits(tracker: &BehaviorTracker, now: DateTime<Utc>) -> PurgeReport {
    let max_age = tracker.config().max_visit_age();
    let visits_removed = tracker.purge_older_than(max_age, now);
    let empty_profiles = tracker.empty_profile_count();

    if visits_removed > 0 {
        info!(visits_removed, empty_profiles, "purged stale visits");
    }
    PurgeReport {
        visits_removed,
        empty_profiles,
    }
}
