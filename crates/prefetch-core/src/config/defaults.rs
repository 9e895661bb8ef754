// Single source of truth for all default values.

// --- Behavior ---
pub const DEFAULT_MAX_VISITS_PER_USER: usize = 500;
pub const DEFAULT_MAX_VISIT_AGE_SECS: u64 = 24 * 60 * 60; // 24 hours

// --- Prediction ---
pub const DEFAULT_TABLE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_MAX_CACHED_TABLES: u64 = 1_000;
pub const DEFAULT_BEHAVIORAL_FALLBACK_PATHS: usize = 2;

// --- Dispatch ---
pub const DEFAULT_GRACE_WINDOW_MS: u64 = 30_000;
pub const DEFAULT_PREFETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_SWEEP_MAX_AGE_SECS: u64 = 300; // 5 minutes

// --- Query cache ---
pub const DEFAULT_GC_TIME_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_STALE_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_MAX_CACHED_QUERIES: u64 = 10_000;

// --- Preload ---
pub const DEFAULT_MAX_CANDIDATES: usize = 3;
pub const DEFAULT_MAINTENANCE_INTERVAL_SECS: u64 = 300; // 5 minutes

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
