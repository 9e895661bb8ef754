use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefetch priority. High-priority prefetches also warm critical assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Low,
}

impl Priority {
    /// Priority for the candidate at `index` in a preload batch: first is high.
    pub fn for_rank(index: usize) -> Self {
        if index == 0 {
            Priority::High
        } else {
            Priority::Low
        }
    }

    pub fn includes_assets(self) -> bool {
        matches!(self, Priority::High)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("high"),
            Priority::Low => f.write_str("low"),
        }
    }
}
