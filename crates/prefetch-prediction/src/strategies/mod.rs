//! Prediction strategies and cross-strategy merging.
//!
//! Strategies are consulted in tier order. When a route is produced by more
//! than one strategy, the earliest tier wins and later duplicates are dropped.

pub mod behavioral;
pub mod common_path;
pub mod temporal;
pub mod transition;

pub use behavioral::BehavioralStrategy;
pub use common_path::CommonPathStrategy;
pub use temporal::TemporalStrategy;
pub use transition::TransitionStrategy;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Transition,
    Behavioral,
    Calendar,
    CommonPath,
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredictionSource::Transition => "transition",
            PredictionSource::Behavioral => "behavioral",
            PredictionSource::Calendar => "calendar",
            PredictionSource::CommonPath => "common_path",
        };
        f.write_str(name)
    }
}

/// A route predicted by one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub route: String,
    pub source: PredictionSource,
    /// Transition or visit count behind the prediction; 0 for table heuristics.
    pub weight: u64,
}

impl RouteCandidate {
    pub fn new(route: impl Into<String>, source: PredictionSource, weight: u64) -> Self {
        Self {
            route: route.into(),
            source,
            weight,
        }
    }
}

/// Merge tiered candidates: drop `exclude` and repeats, keep at most `n`.
pub fn merge(
    candidates: impl IntoIterator<Item = RouteCandidate>,
    exclude: &str,
    n: usize,
) -> Vec<RouteCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| c.route != exclude && seen.insert(c.route.clone()))
        .take(n)
        .collect()
}
