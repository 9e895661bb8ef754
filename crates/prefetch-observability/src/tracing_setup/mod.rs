//! Tracing setup: subscriber initialization and span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prefetch_core::config::ObservabilityConfig;

/// Environment variable holding `EnvFilter` directives,
/// e.g. `PREFETCH_LOG=prefetch_dispatch=debug,prefetch_prediction=info`.
pub const LOG_ENV: &str = "PREFETCH_LOG";

/// Filter used when `PREFETCH_LOG` is unset or invalid. Targets match by
/// prefix, so this covers every `prefetch_*` crate.
pub const DEFAULT_FILTER: &str = "prefetch=info";

static INIT: Once = Once::new();

/// Initialize human-readable logging filtered by `PREFETCH_LOG`.
///
/// Idempotent: only the first initializer in the process has any effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        install(filter, false);
    });
}

/// Initialize logging from configuration. `PREFETCH_LOG` still wins over
/// `log_level` when set.
pub fn init_from_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("prefetch={}", config.log_level)));
        install(filter, config.json);
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
///
/// Returns `false` when tracing was already initialized, here or by the host.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let mut installed = false;
    INIT.call_once(|| installed = install(EnvFilter::new(filter), false));
    installed
}

fn install(filter: EnvFilter, json: bool) -> bool {
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    result.is_ok()
}
