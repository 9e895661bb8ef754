use prefetch_core::models::{HeuristicKind, HeuristicRule};

use crate::signals::TemporalSignals;

use super::{PredictionSource, RouteCandidate};

/// Calendar prediction strategy.
///
/// Uses the first calendar rule matching the current hour and day type.
/// Applies to every user, profiled or not.
pub struct TemporalStrategy;

impl TemporalStrategy {
    pub fn predict(rules: &[HeuristicRule], signals: &TemporalSignals) -> Vec<RouteCandidate> {
        rules
            .iter()
            .find(|r| {
                r.kind == HeuristicKind::Calendar
                    && r.matches(signals.hour_of_day, signals.day_of_week)
            })
            .map(|rule| {
                rule.routes
                    .iter()
                    .map(|route| RouteCandidate::new(route.clone(), PredictionSource::Calendar, 0))
                    .collect()
            })
            .unwrap_or_default()
    }
}
