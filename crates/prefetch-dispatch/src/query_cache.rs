//! In-process query cache with per-key stale times.
//!
//! Backed by `moka::sync::Cache`; entries idle longer than `gc_time` are
//! evicted. A prefetch for a key whose entry is younger than its stale time
//! drops the fetcher unpolled. Concurrent prefetches of one missing key
//! share a single fetch.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use moka::sync::Cache;
use tokio::time::Instant;
use tracing::trace;

use prefetch_core::config::QueryCacheConfig;
use prefetch_core::errors::FetchError;
use prefetch_core::models::QueryKey;
use prefetch_core::traits::{IQueryCache, QueryFetcher};

#[derive(Debug, Clone)]
struct CachedQuery {
    data: Arc<serde_json::Value>,
    fetched_at: Instant,
}

type InflightFetch = Shared<BoxFuture<'static, Result<(), FetchError>>>;

pub struct StaleTimeQueryCache {
    entries: Cache<QueryKey, CachedQuery>,
    inflight: DashMap<QueryKey, InflightFetch>,
    config: QueryCacheConfig,
    fetches: AtomicU64,
    fresh_hits: AtomicU64,
    joined: AtomicU64,
}

impl StaleTimeQueryCache {
    pub fn new(config: QueryCacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_idle(config.gc_time())
            .build();
        Self {
            entries,
            inflight: DashMap::new(),
            config,
            fetches: AtomicU64::new(0),
            fresh_hits: AtomicU64::new(0),
            joined: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &QueryCacheConfig {
        &self.config
    }

    /// Cached data for `key`, fresh or stale.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<serde_json::Value>> {
        self.entries.get(key).map(|e| e.data)
    }

    /// True when `key` is cached and younger than its stale time.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.fetched_at.elapsed() < self.config.stale_time(key))
    }

    /// Seed or overwrite an entry, e.g. after a mutation.
    pub fn set_query_data(&self, key: QueryKey, data: serde_json::Value) {
        self.entries.insert(
            key,
            CachedQuery {
                data: Arc::new(data),
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, key: &QueryKey) {
        self.entries.invalidate(key);
    }

    /// Invalidate every key whose first segment is `head`.
    pub fn invalidate_head(&self, head: &str) -> usize {
        let keys: Vec<Arc<QueryKey>> = self
            .entries
            .iter()
            .filter(|(k, _)| k.head() == Some(head))
            .map(|(k, _)| k)
            .collect();
        for key in &keys {
            self.entries.invalidate(key.as_ref());
        }
        keys.len()
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Number of entries currently held.
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Fetchers actually awaited.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Prefetches skipped because the entry was still fresh.
    pub fn fresh_hit_count(&self) -> u64 {
        self.fresh_hits.load(Ordering::Relaxed)
    }

    /// Prefetches that joined a fetch already running for their key.
    pub fn joined_count(&self) -> u64 {
        self.joined.load(Ordering::Relaxed)
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }

    fn start_fetch(&self, key: QueryKey, fetcher: QueryFetcher) -> InflightFetch {
        let entries = self.entries.clone();
        async move {
            let data = match AssertUnwindSafe(fetcher).catch_unwind().await {
                Ok(result) => result?,
                Err(_) => return Err(FetchError::Aborted(format!("fetcher for {key} panicked"))),
            };
            entries.insert(
                key,
                CachedQuery {
                    data: Arc::new(data),
                    fetched_at: Instant::now(),
                },
            );
            Ok(())
        }
        .boxed()
        .shared()
    }
}

#[async_trait]
impl IQueryCache for StaleTimeQueryCache {
    async fn prefetch_query(&self, key: QueryKey, fetcher: QueryFetcher) -> Result<(), FetchError> {
        if self.is_fresh(&key) {
            self.fresh_hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "query still fresh, fetch skipped");
            return Ok(());
        }

        let fetch = match self.inflight.entry(key.clone()) {
            Entry::Occupied(running) => {
                self.joined.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, "joined running fetch");
                running.get().clone()
            }
            Entry::Vacant(slot) => {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                let fetch = self.start_fetch(key.clone(), fetcher);
                slot.insert(fetch.clone());
                fetch
            }
        };

        let result = fetch.clone().await;
        self.inflight.remove_if(&key, |_, running| running.ptr_eq(&fetch));
        result
    }
}
