//! # prefetch-coordinator
//!
//! Wires the behavior tracker, route predictor and prefetch dispatcher into
//! one explicitly constructed context per browsing session.
//!
//! ```text
//! on_navigation ──► BehaviorTracker ──► RoutePredictor::setup
//! predictive_preload ──► RoutePredictor::predict ──► PrefetchDispatcher::prefetch
//! maintenance loop ──► manage_memory (visit purge + registry sweep)
//! ```

pub mod coordinator;
pub mod maintenance;
pub mod memory;
pub mod user;

pub use coordinator::PrefetchCoordinator;
pub use maintenance::MaintenanceHandle;
pub use memory::MemoryReport;
pub use user::StaticUser;

pub use prefetch_dispatch::Collaborators;
