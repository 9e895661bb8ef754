use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::QueryKey;

/// Prefetch dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// How long a settled prefetch stays registered, blocking re-fetches (ms).
    pub grace_window_ms: u64,
    /// Upper bound on one prefetch attempt (ms).
    pub prefetch_timeout_ms: u64,
    /// Settled entries started longer ago than this are swept (seconds).
    pub sweep_max_age_secs: u64,
    /// Site origin, e.g. `https://exjam.org.ng`. Absolute links on other
    /// origins are never prefetched.
    pub origin: Option<String>,
    /// Route → images and stylesheets warmed for high-priority prefetches.
    pub critical_assets: BTreeMap<String, Vec<String>>,
    pub query_cache: QueryCacheConfig,
}

impl DispatchConfig {
    pub fn grace_window(&self) -> Duration {
        Duration::from_millis(self.grace_window_ms)
    }

    pub fn prefetch_timeout(&self) -> Duration {
        Duration::from_millis(self.prefetch_timeout_ms)
    }

    pub fn sweep_max_age(&self) -> Duration {
        Duration::from_secs(self.sweep_max_age_secs)
    }

    pub fn assets_for(&self, route: &str) -> &[String] {
        self.critical_assets
            .get(route)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            grace_window_ms: defaults::DEFAULT_GRACE_WINDOW_MS,
            prefetch_timeout_ms: defaults::DEFAULT_PREFETCH_TIMEOUT_MS,
            sweep_max_age_secs: defaults::DEFAULT_SWEEP_MAX_AGE_SECS,
            origin: None,
            critical_assets: default_critical_assets(),
            query_cache: QueryCacheConfig::default(),
        }
    }
}

fn default_critical_assets() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 3] = [
        ("/events", &["/images/events/hero.webp", "/_next/static/css/events.css"]),
        (
            "/dashboard",
            &["/images/dashboard/analytics.webp", "/_next/static/css/dashboard.css"],
        ),
        ("/profile", &["/_next/static/css/profile.css"]),
    ];
    table
        .into_iter()
        .map(|(route, assets)| {
            (
                route.to_string(),
                assets.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

/// Staleness policy for the in-process query cache.
///
/// `stale_secs` keys are matched against a query key in this order:
/// the full key joined with `/` (`events/{}`), then `head/*` for keys with
/// more than one segment (`events/*`), then the head alone (`users`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCacheConfig {
    /// Entries unused for this long are evicted (seconds).
    pub gc_time_secs: u64,
    pub max_entries: u64,
    /// Stale time applied when no pattern matches (seconds).
    pub default_stale_secs: u64,
    pub stale_secs: BTreeMap<String, u64>,
}

impl QueryCacheConfig {
    pub fn gc_time(&self) -> Duration {
        Duration::from_secs(self.gc_time_secs)
    }

    /// Resolve the stale time for `key`.
    pub fn stale_time(&self, key: &QueryKey) -> Duration {
        let segments = key.segments();
        let full = segments.join("/");
        let secs = self
            .stale_secs
            .get(&full)
            .or_else(|| {
                if segments.len() > 1 {
                    self.stale_secs.get(&format!("{}/*", segments[0]))
                } else {
                    None
                }
            })
            .or_else(|| key.head().and_then(|h| self.stale_secs.get(h)))
            .copied()
            .unwrap_or(self.default_stale_secs);
        Duration::from_secs(secs)
    }
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        let stale_secs = [
            ("events/{}", 120),
            ("events/*", 300),
            ("registrations", 60),
            ("users", 600),
            ("dashboard", 120),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            gc_time_secs: defaults::DEFAULT_GC_TIME_SECS,
            max_entries: defaults::DEFAULT_MAX_CACHED_QUERIES,
            default_stale_secs: defaults::DEFAULT_STALE_SECS,
            stale_secs,
        }
    }
}
