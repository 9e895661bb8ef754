//! PrefetchDispatcher: at most one in-flight prefetch per route.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn, Instrument};

use prefetch_core::config::DispatchConfig;
use prefetch_core::errors::FetchError;
use prefetch_core::models::{PrefetchOutcome, PrefetchState, PrefetchStatus, Priority};
use prefetch_core::traits::{
    AssetKind, IAssetLoader, IDataSource, IQueryCache, IRouter, IUserContext,
};
use prefetch_observability::prefetch_span;

use crate::handle::PrefetchHandle;
use crate::links;
use crate::plan::{plan_for_route, PrefetchTask};
use crate::registry::{PendingEntry, PendingRegistry};
use crate::stats::{DispatchStats, DispatchStatsSnapshot};

/// External systems a prefetch touches.
#[derive(Clone)]
pub struct Collaborators {
    pub query_cache: Arc<dyn IQueryCache>,
    pub data_source: Arc<dyn IDataSource>,
    /// Bundle prefetching is skipped when the host has no router.
    pub router: Option<Arc<dyn IRouter>>,
    /// Asset warming is skipped when the host has no loader.
    pub assets: Option<Arc<dyn IAssetLoader>>,
    pub user: Arc<dyn IUserContext>,
}

/// Best-effort route prefetcher with request deduplication.
///
/// Cheap to clone; clones share one registry.
#[derive(Clone)]
pub struct PrefetchDispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    registry: PendingRegistry,
    collaborators: Collaborators,
    config: DispatchConfig,
    stats: DispatchStats,
    next_generation: AtomicU64,
}

type TaskFuture = BoxFuture<'static, (PrefetchTask, Result<(), FetchError>)>;

impl PrefetchDispatcher {
    pub fn new(config: DispatchConfig, collaborators: Collaborators) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: PendingRegistry::new(),
                collaborators,
                config,
                stats: DispatchStats::default(),
                next_generation: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &PendingRegistry {
        &self.inner.registry
    }

    /// Prefetch `route`, or join the attempt already registered for it.
    ///
    /// Never fails: the handle resolves to an outcome describing what
    /// happened. Requires a Tokio runtime; without one the handle resolves
    /// immediately to a failed outcome and nothing is registered.
    #[instrument(skip_all, fields(route = %route, priority = %priority))]
    pub fn prefetch(&self, route: &str, priority: Priority) -> PrefetchHandle {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, skipping prefetch");
            return PrefetchHandle::ready(PrefetchOutcome::from_counts(
                route,
                priority,
                1,
                1,
                std::time::Duration::ZERO,
            ));
        };

        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let (handle, started) = self.inner.registry.get_or_register(route, || {
            let attempt = Arc::clone(&self.inner)
                .perform(route.to_string(), priority)
                .boxed()
                .shared();
            PendingEntry {
                handle: PrefetchHandle::new(route.to_string(), attempt),
                state: PrefetchState::Pending,
                priority,
                started_at: Instant::now(),
                settled_at: None,
                generation,
            }
        });

        if !started {
            debug!("joined existing prefetch");
            self.inner.stats.record_deduplicated();
            return handle;
        }

        self.inner.stats.record_started();
        let inner = Arc::clone(&self.inner);
        let driven = handle.clone();
        let span = prefetch_span!(route, priority);
        runtime.spawn(inner.drive(driven, generation).instrument(span));
        handle
    }

    /// Whether `href` is worth prefetching now. Returns the normalized route.
    ///
    /// Rejects foreign origins, API routes, and routes already registered.
    pub fn should_prefetch(&self, href: &str) -> Option<String> {
        let route = links::normalize_href(href, self.inner.config.origin.as_deref())?;
        if self.inner.registry.contains(&route) {
            return None;
        }
        Some(route)
    }

    /// True while `route` is pending or inside its grace window.
    pub fn is_registered(&self, route: &str) -> bool {
        self.inner.registry.contains(route)
    }

    pub fn is_pending(&self, route: &str) -> bool {
        self.inner.registry.state(route) == Some(PrefetchState::Pending)
    }

    pub fn state(&self, route: &str) -> Option<PrefetchState> {
        self.inner.registry.state(route)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.registry.pending_count()
    }

    /// Drop settled registry entries older than `max_age`.
    pub fn sweep_stale(&self, max_age: std::time::Duration) -> usize {
        let removed = self.inner.registry.sweep_settled_older_than(max_age);
        if removed > 0 {
            debug!(removed, "swept stale prefetch entries");
        }
        removed
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.inner.stats.snapshot()
    }
}

impl Inner {
    /// Run the attempt to completion, settle it, hold it for the grace
    /// window, then evict it.
    async fn drive(self: Arc<Self>, handle: PrefetchHandle, generation: u64) {
        let route = handle.route().to_string();
        let outcome = handle.await;

        self.registry.mark_settled(&route, generation, outcome.status);
        self.stats.record_settled(outcome.status);
        match outcome.status {
            PrefetchStatus::Completed => debug!(
                route = %route,
                tasks = outcome.tasks_run,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "prefetch completed"
            ),
            status => info!(
                route = %route,
                ?status,
                failed = outcome.tasks_failed,
                tasks = outcome.tasks_run,
                "prefetch settled with failures"
            ),
        }

        tokio::time::sleep(self.config.grace_window()).await;
        if self.registry.remove_generation(&route, generation) {
            debug!(route = %route, "grace window elapsed, prefetch entry evicted");
        }
    }

    /// The attempt itself: every task concurrently, bounded by the timeout.
    ///
    /// A panicking collaborator fails the attempt instead of unwinding
    /// through the shared handle, so the entry still settles and expires.
    async fn perform(self: Arc<Self>, route: String, priority: Priority) -> PrefetchOutcome {
        let started = Instant::now();
        let tasks = match std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.tasks_for(&route, priority)
        })) {
            Ok(tasks) => tasks,
            Err(panic) => return panicked(route, priority, 0, started, panic),
        };
        let tasks_run = tasks.len();

        let timeout = self.config.prefetch_timeout();
        let attempt = tokio::time::timeout(timeout, futures::future::join_all(tasks));
        match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(Ok(results)) => {
                let mut failed = 0;
                for (task, result) in results {
                    if let Err(e) = result {
                        failed += 1;
                        warn!(route = %route, task = %task, error = %e, "prefetch task failed");
                    }
                }
                PrefetchOutcome::from_counts(route, priority, tasks_run, failed, started.elapsed())
            }
            Ok(Err(_)) => {
                let e = FetchError::Timeout {
                    elapsed_ms: timeout.as_millis() as u64,
                };
                warn!(route = %route, error = %e, "prefetch abandoned");
                PrefetchOutcome::timed_out(route, priority, tasks_run, started.elapsed())
            }
            Err(panic) => panicked(route, priority, tasks_run, started, panic),
        }
    }

    fn tasks_for(&self, route: &str, priority: Priority) -> Vec<TaskFuture> {
        let c = &self.collaborators;
        let mut tasks: Vec<TaskFuture> = Vec::new();

        if let Some(router) = &c.router {
            let router = Arc::clone(router);
            let route = route.to_string();
            tasks.push(
                async move { (PrefetchTask::Bundle, router.prefetch(&route).await) }.boxed(),
            );
        }

        let user_id = c.user.current_user_id();
        for key in plan_for_route(route, user_id.as_deref()) {
            let cache = Arc::clone(&c.query_cache);
            let source = Arc::clone(&c.data_source);
            let fetch_key = key.clone();
            let fetcher = async move { source.fetch(&fetch_key).await }.boxed();
            tasks.push(
                async move {
                    let result = cache.prefetch_query(key.clone(), fetcher).await;
                    (PrefetchTask::Data(key), result)
                }
                .boxed(),
            );
        }

        if priority.includes_assets() {
            if let Some(loader) = &c.assets {
                for asset in self.config.assets_for(route) {
                    let loader = Arc::clone(loader);
                    let path = asset.clone();
                    let kind = AssetKind::of(&path);
                    tasks.push(
                        async move {
                            let result = match loader.load(&path, kind).await {
                                // A broken image still counts as warmed.
                                Err(e) if kind == AssetKind::Image => {
                                    debug!(asset = %path, error = %e, "image prefetch error ignored");
                                    Ok(())
                                }
                                other => other,
                            };
                            (PrefetchTask::Asset { path, kind }, result)
                        }
                        .boxed(),
                    );
                }
            }
        }

        tasks
    }
}

fn panicked(
    route: String,
    priority: Priority,
    tasks_run: usize,
    started: Instant,
    panic: Box<dyn Any + Send>,
) -> PrefetchOutcome {
    let message = panic
        .downcast_ref::<&str>()
        .map(|m| m.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    warn!(route = %route, panic = %message, "prefetch collaborator panicked");
    // Every task is lost with the panic.
    let tasks = tasks_run.max(1);
    PrefetchOutcome::from_counts(route, priority, tasks, tasks, started.elapsed())
}
