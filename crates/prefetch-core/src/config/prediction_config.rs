use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::heuristic::{self, HeuristicRule};

/// Route predictor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// How long a built transition table is reused (seconds).
    pub table_ttl_secs: u64,
    /// Maximum number of per-user tables held in the cache.
    pub max_cached_tables: u64,
    /// Common paths suggested when no behavioral hour rule matches.
    pub behavioral_fallback_paths: usize,
    /// Time-of-day / day-of-week table, evaluated in order.
    pub heuristics: Vec<HeuristicRule>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            table_ttl_secs: defaults::DEFAULT_TABLE_TTL_SECS,
            max_cached_tables: defaults::DEFAULT_MAX_CACHED_TABLES,
            behavioral_fallback_paths: defaults::DEFAULT_BEHAVIORAL_FALLBACK_PATHS,
            heuristics: heuristic::default_rules(),
        }
    }
}
