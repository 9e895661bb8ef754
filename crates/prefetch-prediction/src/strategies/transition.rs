use crate::transitions::TransitionTable;

use super::{PredictionSource, RouteCandidate};

/// Markov strategy: most frequent next routes after the current one.
pub struct TransitionStrategy;

impl TransitionStrategy {
    pub fn predict(table: &TransitionTable, current_path: &str, n: usize) -> Vec<RouteCandidate> {
        table
            .top_destinations(current_path, n)
            .into_iter()
            .map(|(route, count)| RouteCandidate::new(route, PredictionSource::Transition, count))
            .collect()
    }
}
