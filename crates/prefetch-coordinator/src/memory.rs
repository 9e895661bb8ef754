use serde::{Deserialize, Serialize};

/// What one memory-management pass removed and what remains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReport {
    pub visits_removed: usize,
    pub empty_profiles: usize,
    pub registry_entries_swept: usize,
    /// Users still tracked after the pass.
    pub users: usize,
    pub pending_prefetches: usize,
}

impl MemoryReport {
    /// True when the pass removed anything.
    pub fn reclaimed(&self) -> bool {
        self.visits_removed > 0 || self.registry_entries_swept > 0
    }
}
