//! PrefetchCoordinator: the prefetch context of one browsing session.

use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, info, trace, Instrument};
use uuid::Uuid;

use prefetch_behavior::{purge_stale_visits, BehaviorTracker};
use prefetch_core::config::PrefetchConfig;
use prefetch_core::errors::{PrefetchError, PrefetchResult};
use prefetch_core::models::{PrefetchOutcome, Priority};
use prefetch_core::traits::IUserContext;
use prefetch_dispatch::{Collaborators, LinkObserver, PrefetchDispatcher, PrefetchHandle};
use prefetch_observability::{preload_span, purge_span};
use prefetch_prediction::{RoutePredictor, TemporalSignals};

use crate::maintenance::MaintenanceHandle;
use crate::memory::MemoryReport;

/// Owns the tracker, predictor and dispatcher for one session.
///
/// Cheap to clone; clones share all state. Nothing here is global: two
/// coordinators never see each other's visits or in-flight prefetches.
#[derive(Clone)]
pub struct PrefetchCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    session_id: Uuid,
    config: PrefetchConfig,
    tracker: BehaviorTracker,
    predictor: RoutePredictor,
    dispatcher: PrefetchDispatcher,
    user: Arc<dyn IUserContext>,
    shutdown: watch::Sender<bool>,
}

impl PrefetchCoordinator {
    pub fn new(config: PrefetchConfig, collaborators: Collaborators) -> Self {
        let tracker = BehaviorTracker::new(config.behavior.clone());
        let predictor = RoutePredictor::new(tracker.clone(), config.prediction.clone());
        let user = Arc::clone(&collaborators.user);
        let dispatcher = PrefetchDispatcher::new(config.dispatch.clone(), collaborators);
        let (shutdown, _) = watch::channel(false);
        let session_id = Uuid::new_v4();
        info!(%session_id, "prefetch session started");

        Self {
            inner: Arc::new(Inner {
                session_id,
                config,
                tracker,
                predictor,
                dispatcher,
                user,
                shutdown,
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    pub fn config(&self) -> &PrefetchConfig {
        &self.inner.config
    }

    pub fn tracker(&self) -> &BehaviorTracker {
        &self.inner.tracker
    }

    pub fn predictor(&self) -> &RoutePredictor {
        &self.inner.predictor
    }

    pub fn dispatcher(&self) -> &PrefetchDispatcher {
        &self.inner.dispatcher
    }

    /// Signed-in user, if any. Empty ids count as anonymous.
    pub fn current_user(&self) -> Option<String> {
        self.inner
            .user
            .current_user_id()
            .filter(|id| !id.is_empty())
    }

    /// Record a navigation and refresh the user's transition table.
    ///
    /// Returns `false` (and records nothing) for anonymous sessions.
    pub fn on_navigation(&self, path: &str, referrer: Option<&str>) -> bool {
        self.on_navigation_at(path, referrer, Utc::now())
    }

    pub fn on_navigation_at(&self, path: &str, referrer: Option<&str>, at: DateTime<Utc>) -> bool {
        let Some(user_id) = self.current_user() else {
            trace!(path, "no signed-in user, navigation not tracked");
            return false;
        };
        let inner = &self.inner;
        inner.tracker.ensure_profile(&user_id, inner.user.device_info());
        if !inner.tracker.record_visit_at(&user_id, path, referrer, at) {
            return false;
        }
        inner.predictor.setup(&user_id);
        true
    }

    /// Prefetch the most likely next routes after `current_path`.
    ///
    /// The first candidate is prefetched at high priority, the rest at low.
    /// Waits for every attempt to settle and returns their outcomes; never
    /// fails.
    pub async fn predictive_preload(&self, current_path: &str) -> Vec<PrefetchOutcome> {
        self.predictive_preload_at(current_path, &TemporalSignals::gather())
            .await
    }

    /// [`predictive_preload`](Self::predictive_preload) with explicit temporal signals.
    pub async fn predictive_preload_at(
        &self,
        current_path: &str,
        signals: &TemporalSignals,
    ) -> Vec<PrefetchOutcome> {
        let span = preload_span!(current_path);
        let handles: Vec<PrefetchHandle> = {
            let _entered = span.enter();
            let user_id = self.current_user().unwrap_or_default();
            let routes = self.inner.predictor.predict_at(
                &user_id,
                current_path,
                self.inner.config.preload.max_candidates,
                signals,
            );
            span.record("candidates", routes.len());
            routes
                .iter()
                .enumerate()
                .map(|(rank, route)| self.inner.dispatcher.prefetch(route, Priority::for_rank(rank)))
                .collect()
        };
        join_all(handles).instrument(span).await
    }

    /// Prefetch one route directly.
    pub fn prefetch_route(&self, route: &str, priority: Priority) -> PrefetchHandle {
        self.inner.dispatcher.prefetch(route, priority)
    }

    /// Whether a link target is worth prefetching; returns the normalized route.
    pub fn should_prefetch(&self, href: &str) -> Option<String> {
        self.inner.dispatcher.should_prefetch(href)
    }

    /// A link observer feeding this session's dispatcher.
    pub fn link_observer(&self) -> LinkObserver {
        LinkObserver::new(self.inner.dispatcher.clone())
    }

    /// Purge old visits and sweep settled prefetch entries.
    pub fn manage_memory(&self) -> MemoryReport {
        self.manage_memory_at(Utc::now())
    }

    pub fn manage_memory_at(&self, now: DateTime<Utc>) -> MemoryReport {
        self.inner.manage_memory_at(now)
    }

    /// Run [`manage_memory`](Self::manage_memory) every
    /// `preload.maintenance_interval_secs` until stopped.
    ///
    /// The loop holds no strong reference to the coordinator.
    pub fn spawn_maintenance(&self) -> PrefetchResult<MaintenanceHandle> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PrefetchError::RuntimeUnavailable(e.to_string()))?;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let period = self.inner.config.preload.maintenance_interval();
        debug!(period_secs = period.as_secs(), "starting maintenance loop");
        Ok(MaintenanceHandle::spawn(
            &runtime,
            period,
            self.inner.shutdown.subscribe(),
            move || weak.upgrade().map(|inner| inner.manage_memory_at(Utc::now())),
        ))
    }

    /// Stop maintenance and drop everything learned in this session.
    pub fn shutdown(&self) {
        self.inner.shutdown.send_replace(true);
        self.inner.predictor.invalidate_all();
        self.inner.tracker.clear();
        info!(session_id = %self.inner.session_id, "prefetch session shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        *self.inner.shutdown.borrow()
    }
}

impl Inner {
    fn manage_memory_at(&self, now: DateTime<Utc>) -> MemoryReport {
        let span = purge_span!(self.tracker.user_count());
        let _entered = span.enter();

        let purge = purge_stale_visits(&self.tracker, now);
        if purge.visits_removed > 0 {
            // tables were built from visits that no longer exist
            self.predictor.invalidate_all();
        }
        let swept = self
            .dispatcher
            .sweep_stale(self.config.dispatch.sweep_max_age());

        let report = MemoryReport {
            visits_removed: purge.visits_removed,
            empty_profiles: purge.empty_profiles,
            registry_entries_swept: swept,
            users: self.tracker.user_count(),
            pending_prefetches: self.dispatcher.pending_count(),
        };
        debug!(?report, "memory managed");
        report
    }
}
