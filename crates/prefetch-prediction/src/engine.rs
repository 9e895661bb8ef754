//! RoutePredictor: coordinates strategies over the behavior tracker and
//! caches per-user transition tables.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use prefetch_behavior::BehaviorTracker;
use prefetch_core::config::PredictionConfig;

use crate::cache::TransitionCache;
use crate::signals::TemporalSignals;
use crate::strategies::{
    self, BehavioralStrategy, CommonPathStrategy, RouteCandidate, TemporalStrategy,
    TransitionStrategy,
};
use crate::transitions::TransitionTable;

/// Next-route predictor. Infallible: missing data yields fewer routes.
pub struct RoutePredictor {
    tracker: BehaviorTracker,
    cache: TransitionCache,
    config: PredictionConfig,
}

impl RoutePredictor {
    pub fn new(tracker: BehaviorTracker, config: PredictionConfig) -> Self {
        let cache = TransitionCache::new(
            Duration::from_secs(config.table_ttl_secs),
            config.max_cached_tables,
        );
        Self {
            tracker,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &TransitionCache {
        &self.cache
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Rebuild the user's transition table from their full visit history.
    pub fn setup(&self, user_id: &str) -> Arc<TransitionTable> {
        let visits = self.tracker.visits(user_id);
        let table = Arc::new(TransitionTable::from_visits(&visits));
        debug!(user_id, sources = table.sources().count(), total = table.total(), "rebuilt transition table");
        self.cache.insert(user_id.to_string(), Arc::clone(&table));
        table
    }

    /// Cached table for the user, building it on a miss.
    pub fn table(&self, user_id: &str) -> Arc<TransitionTable> {
        self.cache.get(user_id).unwrap_or_else(|| self.setup(user_id))
    }

    /// Up to `n` likely next routes after `current_path`, using the local clock.
    pub fn predict(&self, user_id: &str, current_path: &str, n: usize) -> Vec<String> {
        self.predict_at(user_id, current_path, n, &TemporalSignals::gather())
    }

    /// [`predict`](Self::predict) with explicit temporal signals.
    pub fn predict_at(
        &self,
        user_id: &str,
        current_path: &str,
        n: usize,
        signals: &TemporalSignals,
    ) -> Vec<String> {
        self.predict_candidates(user_id, current_path, n, signals)
            .into_iter()
            .map(|c| c.route)
            .collect()
    }

    /// Ranked candidates with their originating strategy.
    ///
    /// Tiers: transitions from `current_path`, then behavioral rules, then
    /// calendar rules, then the user's common paths. `current_path` itself
    /// is never suggested.
    pub fn predict_candidates(
        &self,
        user_id: &str,
        current_path: &str,
        n: usize,
        signals: &TemporalSignals,
    ) -> Vec<RouteCandidate> {
        if n == 0 {
            return Vec::new();
        }
        // Anonymous sessions only get calendar predictions.
        let table = if user_id.is_empty() {
            Arc::new(TransitionTable::default())
        } else {
            self.table(user_id)
        };
        let profile = self.tracker.profile(user_id);
        let rules = &self.config.heuristics;

        // Over-fetch each tier by one: the current path may be among them.
        let tiered = TransitionStrategy::predict(&table, current_path, n.saturating_add(1))
            .into_iter()
            .chain(BehavioralStrategy::predict(
                rules,
                signals,
                profile.as_ref(),
                self.config.behavioral_fallback_paths,
            ))
            .chain(TemporalStrategy::predict(rules, signals))
            .chain(CommonPathStrategy::predict(profile.as_ref(), n.saturating_add(1)));

        let merged = strategies::merge(tiered, current_path, n);
        debug!(
            user_id,
            current_path,
            predicted = merged.len(),
            "predicted next routes"
        );
        merged
    }

    /// Drop the cached table for a user.
    pub fn invalidate(&self, user_id: &str) {
        self.cache.invalidate(user_id);
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
