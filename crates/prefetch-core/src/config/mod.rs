//! Configuration for the prefetch engine.
//! TOML-based, 3-layer resolution: env > file > compiled defaults.

pub mod behavior_config;
pub mod defaults;
pub mod dispatch_config;
pub mod observability_config;
pub mod prediction_config;
pub mod prefetch_config;
pub mod preload_config;

pub use behavior_config::BehaviorConfig;
pub use dispatch_config::{DispatchConfig, QueryCacheConfig};
pub use observability_config::ObservabilityConfig;
pub use prediction_config::PredictionConfig;
pub use prefetch_config::PrefetchConfig;
pub use preload_config::PreloadConfig;
