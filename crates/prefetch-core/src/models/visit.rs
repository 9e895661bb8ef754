use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One navigation event. Kept in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Route path visited, e.g. `/events/42`.
    pub path: String,
    /// When the navigation happened.
    pub timestamp: DateTime<Utc>,
    /// Referring URL, if the host knew one.
    pub referrer: Option<String>,
}

impl VisitRecord {
    pub fn new(path: impl Into<String>, timestamp: DateTime<Utc>, referrer: Option<String>) -> Self {
        Self {
            path: path.into(),
            timestamp,
            referrer: referrer.filter(|r| !r.is_empty()),
        }
    }

    /// Age of this visit relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.timestamp
    }
}
