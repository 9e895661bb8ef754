//! # prefetch-dispatch
//!
//! Speculative route prefetching with at most one in-flight attempt per route.
//!
//! Per-route state machine: `idle → pending → settled(status) → idle`, where
//! the last transition happens after a fixed grace window. While a route is
//! registered (pending or in grace), further `prefetch` calls join the
//! existing attempt instead of issuing new network calls.
//!
//! Prefetching is advisory: every failure is logged and folded into the
//! returned [`PrefetchOutcome`](prefetch_core::PrefetchOutcome), never raised.

pub mod dispatcher;
pub mod handle;
pub mod links;
pub mod plan;
pub mod query_cache;
pub mod registry;
pub mod stats;

pub use dispatcher::{Collaborators, PrefetchDispatcher};
pub use handle::PrefetchHandle;
pub use links::{normalize_href, LinkEvent, LinkObserver};
pub use plan::{plan_for_route, PrefetchTask};
pub use query_cache::StaleTimeQueryCache;
pub use registry::PendingRegistry;
pub use stats::{DispatchStats, DispatchStatsSnapshot};
