//! Per-user transition table cache.
//!
//! Uses `moka::sync::Cache` with a fixed TTL. Tracks hits/misses/rate.
//! Entries are replaced wholesale by `RoutePredictor::setup`.

use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::transitions::TransitionTable;

/// Transition table cache with hit/miss tracking.
pub struct TransitionCache {
    cache: Cache<String, Arc<TransitionTable>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TransitionCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the cached table for a user.
    pub fn get(&self, user_id: &str) -> Option<Arc<TransitionTable>> {
        match self.cache.get(user_id) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, user_id: String, table: Arc<TransitionTable>) {
        self.cache.insert(user_id, table);
    }

    pub fn invalidate(&self, user_id: &str) {
        self.cache.invalidate(user_id);
    }

    /// Invalidate all cache entries (e.g., on session teardown).
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let h = self.hits() as f64;
        let m = self.misses() as f64;
        let total = h + m;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }

    /// Number of entries currently in the cache.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_hits_and_misses() {
        let cache = TransitionCache::new(Duration::from_secs(60), 10);
        assert!(cache.get("u1").is_none());
        cache.insert("u1".to_string(), Arc::new(TransitionTable::new()));
        assert!(cache.get("u1").is_some());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = TransitionCache::new(Duration::from_secs(60), 10);
        cache.insert("u1".to_string(), Arc::new(TransitionTable::new()));
        cache.invalidate("u1");
        assert!(cache.get("u1").is_none());
    }
}
