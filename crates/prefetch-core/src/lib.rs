//! # prefetch-core
//!
//! Foundation crate for the route prefetch engine.
//! Defines the shared models, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PrefetchConfig;
pub use errors::{FetchError, PrefetchError, PrefetchResult};
pub use models::{DeviceInfo, Priority, PrefetchOutcome, PrefetchStatus, QueryKey, VisitRecord};
