//! # prefetch-observability
//!
//! Structured logging for the prefetch engine: subscriber setup driven by
//! `PREFETCH_LOG` or [`ObservabilityConfig`](prefetch_core::config::ObservabilityConfig),
//! and span macros for the long-running operations.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
