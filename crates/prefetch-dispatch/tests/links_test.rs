use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use prefetch_core::config::DispatchConfig;
use prefetch_core::errors::FetchError;
use prefetch_core::models::{Priority, QueryKey};
use prefetch_core::traits::{IDataSource, IQueryCache, IUserContext, QueryFetcher};
use prefetch_dispatch::{Collaborators, LinkEvent, LinkObserver, PrefetchDispatcher};

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

#[async_trait]
impl IDataSource for CountingSource {
    async fn fetch(&self, _key: &QueryKey) -> Result<serde_json::Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::Value::Null)
    }
}

struct PassThroughCache;

#[async_trait]
impl IQueryCache for PassThroughCache {
    async fn prefetch_query(&self, _key: QueryKey, fetcher: QueryFetcher) -> Result<(), FetchError> {
        fetcher.await.map(|_| ())
    }
}

struct SignedIn;

impl IUserContext for SignedIn {
    fn current_user_id(&self) -> Option<String> {
        Some("U".to_string())
    }
}

fn dispatcher() -> (PrefetchDispatcher, Arc<CountingSource>) {
    let source = Arc::new(CountingSource::default());
    let config = DispatchConfig {
        origin: Some("https://exjam.org.ng".to_string()),
        ..DispatchConfig::default()
    };
    let collaborators = Collaborators {
        query_cache: Arc::new(PassThroughCache),
        data_source: source.clone(),
        router: None,
        assets: None,
        user: Arc::new(SignedIn),
    };
    (PrefetchDispatcher::new(config, collaborators), source)
}

#[tokio::test(start_paused = true)]
async fn visible_observed_link_is_prefetched_at_low_priority() {
    let (dispatcher, source) = dispatcher();
    let mut observer = LinkObserver::new(dispatcher.clone());

    assert!(observer
        .handle(LinkEvent::Inserted(vec!["/events".into(), "/dashboard".into()]))
        .is_empty());
    assert_eq!(observer.observed_count(), 2);

    let handles = observer.handle(LinkEvent::Visible("/events".into()));
    assert_eq!(handles.len(), 1);
    let outcome = handles.into_iter().next().unwrap().await;
    assert_eq!(outcome.priority, Priority::Low);
    assert_eq!(outcome.route, "/events");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn unobserved_links_are_ignored() {
    let (dispatcher, _) = dispatcher();
    let mut observer = LinkObserver::new(dispatcher.clone());

    assert!(observer.handle(LinkEvent::Visible("/events".into())).is_empty());
    assert!(!dispatcher.is_registered("/events"));
}

#[tokio::test(start_paused = true)]
async fn only_root_relative_non_api_links_are_observed() {
    let (dispatcher, _) = dispatcher();
    let mut observer = LinkObserver::new(dispatcher);

    let added = observer.observe([
        "/events",
        "/events#top",
        "https://exjam.org.ng/profile",
        "https://example.com/",
        "/api/events",
        "mailto:info@exjam.org.ng",
    ]);
    assert_eq!(added, 1);
    assert!(observer.is_observed("/events"));
    assert!(observer.is_observed("https://exjam.org.ng/events"));
    assert!(!observer.is_observed("/profile"));
}

#[tokio::test(start_paused = true)]
async fn repeated_visibility_joins_the_registered_prefetch() {
    let (dispatcher, source) = dispatcher();
    let mut observer = LinkObserver::new(dispatcher.clone());
    observer.observe(["/events/3"]);

    for handle in observer.handle(LinkEvent::Visible("/events/3".into())) {
        handle.await;
    }
    // still inside the grace window, so should_prefetch refuses it
    assert!(observer.handle(LinkEvent::Visible("/events/3".into())).is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn spawned_observer_drains_the_channel() {
    let (dispatcher, _) = dispatcher();
    let observer = LinkObserver::new(dispatcher.clone());
    let (tx, rx) = mpsc::channel(8);
    let task = observer.spawn(rx);

    tx.send(LinkEvent::Inserted(vec!["/events".into(), "/profile".into()]))
        .await
        .unwrap();
    tx.send(LinkEvent::Visible("/events".into())).await.unwrap();
    tx.send(LinkEvent::Visible("/profile".into())).await.unwrap();
    tx.send(LinkEvent::Visible("/dashboard".into())).await.unwrap();
    drop(tx);

    assert_eq!(task.await.unwrap(), 2);
    assert!(dispatcher.is_registered("/events"));
    assert!(dispatcher.is_registered("/profile"));
    assert!(!dispatcher.is_registered("/dashboard"));
}
