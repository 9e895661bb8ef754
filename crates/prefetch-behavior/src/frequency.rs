//! Path frequency ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use prefetch_core::models::VisitRecord;

/// Visit statistics for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFrequency {
    pub path: String,
    pub count: u64,
    /// Timestamp of the most recent visit to this path.
    pub last_seen: DateTime<Utc>,
    /// Position of that visit in the history, breaking equal timestamps.
    #[serde(skip)]
    last_index: usize,
}

/// Rank every distinct path in `visits`.
///
/// Order: visit count descending, then most recent occurrence first, then
/// path ascending. The result is fully deterministic for a given history.
pub fn rank_paths(visits: &[VisitRecord]) -> Vec<PathFrequency> {
    let mut stats: HashMap<&str, PathFrequency> = HashMap::new();

    for (index, visit) in visits.iter().enumerate() {
        stats
            .entry(visit.path.as_str())
            .and_modify(|f| {
                f.count += 1;
                if (visit.timestamp, index) >= (f.last_seen, f.last_index) {
                    f.last_seen = visit.timestamp;
                    f.last_index = index;
                }
            })
            .or_insert_with(|| PathFrequency {
                path: visit.path.clone(),
                count: 1,
                last_seen: visit.timestamp,
                last_index: index,
            });
    }

    let mut ranked: Vec<PathFrequency> = stats.into_values().collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| (b.last_seen, b.last_index).cmp(&(a.last_seen, a.last_index)))
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked
}

/// The `k` top-ranked paths.
pub fn top_paths(visits: &[VisitRecord], k: usize) -> Vec<String> {
    rank_paths(visits)
        .into_iter()
        .take(k)
        .map(|f| f.path)
        .collect()
}
