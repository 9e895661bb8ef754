//! Shared data models.

pub mod device_info;
pub mod heuristic;
pub mod outcome;
pub mod priority;
pub mod query_key;
pub mod visit;

pub use device_info::DeviceInfo;
pub use heuristic::{DayType, HeuristicKind, HeuristicRule};
pub use outcome::{PrefetchOutcome, PrefetchState, PrefetchStatus};
pub use priority::Priority;
pub use query_key::QueryKey;
pub use visit::VisitRecord;
