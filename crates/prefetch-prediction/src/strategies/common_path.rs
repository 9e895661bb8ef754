use prefetch_behavior::{rank_paths, BehaviorProfile};

use super::{PredictionSource, RouteCandidate};

/// Last-resort strategy: the user's most visited paths.
pub struct CommonPathStrategy;

impl CommonPathStrategy {
    pub fn predict(profile: Option<&BehaviorProfile>, n: usize) -> Vec<RouteCandidate> {
        let Some(profile) = profile else {
            return Vec::new();
        };
        rank_paths(&profile.visits)
            .into_iter()
            .take(n)
            .map(|f| RouteCandidate::new(f.path, PredictionSource::CommonPath, f.count))
            .collect()
    }
}
