/// Prefetch engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of common paths kept on a behavior profile after each visit.
pub const COMMON_PATHS_RETAINED: usize = 5;

/// Prefix of server API routes. These are never prefetched.
pub const API_ROUTE_PREFIX: &str = "/api/";

/// Extensions loaded as images rather than link-prefetched.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".png", ".webp"];

/// Placeholder used in query keys for the unfiltered events list.
pub const EMPTY_FILTER_SEGMENT: &str = "{}";

/// Upper bound for any configured duration, in seconds (100 years).
pub const MAX_DURATION_SECS: u64 = 100 * 365 * 24 * 60 * 60;
