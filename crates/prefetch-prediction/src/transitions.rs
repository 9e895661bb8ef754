//! First-order Markov transition table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use prefetch_core::models::VisitRecord;

/// `from → (to → count)`, derived by scanning consecutive visits.
///
/// Ordered maps keep iteration, and therefore tie-breaking, deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    transitions: BTreeMap<String, BTreeMap<String, u64>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a visit history in arrival order.
    pub fn from_visits(visits: &[VisitRecord]) -> Self {
        let mut table = Self::new();
        for pair in visits.windows(2) {
            table.record(&pair[0].path, &pair[1].path);
        }
        table
    }

    /// Count one traversal `from → to`.
    pub fn record(&mut self, from: &str, to: &str) {
        *self
            .transitions
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0) += 1;
    }

    /// Traversal count for `from → to`.
    pub fn count(&self, from: &str, to: &str) -> u64 {
        self.transitions
            .get(from)
            .and_then(|dests| dests.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Up to `n` destinations from `from`, by descending count.
    /// Equal counts are ordered lexicographically by destination.
    pub fn top_destinations(&self, from: &str, n: usize) -> Vec<(String, u64)> {
        let Some(dests) = self.transitions.get(from) else {
            return Vec::new();
        };
        let mut ranked: Vec<(String, u64)> =
            dests.iter().map(|(to, c)| (to.clone(), *c)).collect();
        // Stable sort over a BTreeMap walk keeps lexicographic order among ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn has_transitions_from(&self, from: &str) -> bool {
        self.transitions.contains_key(from)
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Total traversals recorded.
    pub fn total(&self) -> u64 {
        self.transitions.values().flat_map(|d| d.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
