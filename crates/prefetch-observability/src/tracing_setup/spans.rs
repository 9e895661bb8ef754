//! Span definitions for prefetch, predictive preload and memory purge.

/// Create a span around one route prefetch.
#[macro_export]
macro_rules! prefetch_span {
    ($route:expr, $priority:expr) => {
        tracing::info_span!("prefetch.route", route = %$route, priority = %$priority)
    };
}

/// Create a span around one predictive preload pass.
#[macro_export]
macro_rules! preload_span {
    ($current_path:expr) => {
        tracing::info_span!(
            "prefetch.preload",
            current_path = %$current_path,
            candidates = tracing::field::Empty
        )
    };
}

/// Create a span around one memory-management pass.
#[macro_export]
macro_rules! purge_span {
    ($user_count:expr) => {
        tracing::info_span!("prefetch.purge", users = $user_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PREFETCH: &str = "prefetch.route";
    pub const PRELOAD: &str = "prefetch.preload";
    pub const PURGE: &str = "prefetch.purge";
}
