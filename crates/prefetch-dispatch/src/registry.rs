//! PendingRegistry: route → in-flight or recently settled prefetch.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use prefetch_core::models::{PrefetchState, PrefetchStatus, Priority};

use crate::handle::PrefetchHandle;

/// One registered prefetch attempt.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    pub handle: PrefetchHandle,
    pub state: PrefetchState,
    pub priority: Priority,
    pub started_at: Instant,
    pub settled_at: Option<Instant>,
    /// Distinguishes successive attempts for the same route, so a late
    /// eviction timer never removes a newer entry.
    pub generation: u64,
}

/// Concurrent registry of prefetch attempts keyed by route.
#[derive(Debug, Default)]
pub struct PendingRegistry {
    entries: DashMap<String, PendingEntry>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registered handle for `route`, or register the one built by
    /// `start`. Lookup and insert happen under one shard lock, with nothing
    /// awaited in between, so two callers can never both start an attempt.
    ///
    /// The boolean is `true` when a new entry was inserted.
    pub fn get_or_register<F>(&self, route: &str, start: F) -> (PrefetchHandle, bool)
    where
        F: FnOnce() -> PendingEntry,
    {
        match self.entries.entry(route.to_string()) {
            Entry::Occupied(existing) => (existing.get().handle.joined(), false),
            Entry::Vacant(slot) => {
                let entry = start();
                let handle = entry.handle.clone();
                slot.insert(entry);
                (handle, true)
            }
        }
    }

    /// Move the entry of `generation` to `Settled`.
    pub fn mark_settled(&self, route: &str, generation: u64, status: PrefetchStatus) {
        if let Some(mut entry) = self.entries.get_mut(route) {
            if entry.generation == generation {
                entry.state = PrefetchState::Settled(status);
                entry.settled_at = Some(Instant::now());
            }
        }
    }

    /// Remove the entry for `route` only if it still belongs to `generation`.
    pub fn remove_generation(&self, route: &str, generation: u64) -> bool {
        self.entries
            .remove_if(route, |_, entry| entry.generation == generation)
            .is_some()
    }

    /// Remove settled entries that started at least `max_age` ago.
    /// Pending entries are left alone. Returns how many were removed.
    pub fn sweep_settled_older_than(&self, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            !(matches!(entry.state, PrefetchState::Settled(_)) && entry.started_at.elapsed() >= max_age)
        });
        before.saturating_sub(self.entries.len())
    }

    pub fn contains(&self, route: &str) -> bool {
        self.entries.contains_key(route)
    }

    pub fn state(&self, route: &str) -> Option<PrefetchState> {
        self.entries.get(route).map(|e| e.state)
    }

    pub fn handle(&self, route: &str) -> Option<PrefetchHandle> {
        self.entries.get(route).map(|e| e.handle.joined())
    }

    /// Routes whose attempt has not settled yet.
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == PrefetchState::Pending)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn routes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
