//! # prefetch-behavior
//!
//! Records visited routes per user and derives frequency statistics.
//!
//! - [`BehaviorTracker`]: concurrent per-user profiles via `DashMap`
//! - [`BehaviorProfile`]: visit list, top paths, device snapshot
//! - [`rank_paths`]: count-then-recency ranking behind `common_paths`
//! - [`purge_stale_visits`]: time-window purge, driven externally on an interval

pub mod frequency;
pub mod profile;
pub mod purge;
pub mod tracker;

pub use frequency::{rank_paths, PathFrequency};
pub use profile::BehaviorProfile;
pub use purge::{purge_stale_visits, PurgeReport};
pub use tracker::BehaviorTracker;
