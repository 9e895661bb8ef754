use prefetch_behavior::BehaviorProfile;
use prefetch_core::models::{HeuristicKind, HeuristicRule};

use crate::signals::TemporalSignals;

use super::{PredictionSource, RouteCandidate};

/// Behavioral prediction strategy.
///
/// Only applies to users with a behavior profile. The first behavioral rule
/// matching the current hour wins; when none matches, the user's own top
/// paths are suggested instead.
pub struct BehavioralStrategy;

impl BehavioralStrategy {
    pub fn predict(
        rules: &[HeuristicRule],
        signals: &TemporalSignals,
        profile: Option<&BehaviorProfile>,
        fallback_paths: usize,
    ) -> Vec<RouteCandidate> {
        let Some(profile) = profile else {
            return Vec::new();
        };

        let matched = rules.iter().find(|r| {
            r.kind == HeuristicKind::Behavioral && r.matches(signals.hour_of_day, signals.day_of_week)
        });

        match matched {
            Some(rule) => rule
                .routes
                .iter()
                .map(|route| RouteCandidate::new(route.clone(), PredictionSource::Behavioral, 0))
                .collect(),
            None => profile
                .common_paths(fallback_paths)
                .into_iter()
                .map(|route| RouteCandidate::new(route, PredictionSource::Behavioral, 0))
                .collect(),
        }
    }
}
