//! Link-visibility triggers.
//!
//! The host watches rendered links and reports two kinds of events: links
//! appearing in the document, and observed links scrolling into view. Only
//! root-relative links are observed; a visible observed link is prefetched
//! at low priority when [`PrefetchDispatcher::should_prefetch`] accepts it.

use std::collections::HashSet;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use prefetch_core::constants::API_ROUTE_PREFIX;
use prefetch_core::models::Priority;

use crate::dispatcher::PrefetchDispatcher;
use crate::handle::PrefetchHandle;

/// Something the host observed about links in the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A link entered the viewport.
    Visible(String),
    /// Links were added to the document.
    Inserted(Vec<String>),
}

/// Normalize a link target to a prefetchable route.
///
/// Same-origin absolute URLs are reduced to their path; absolute URLs on any
/// other origin (or any absolute URL when `origin` is unknown) are rejected,
/// as are relative paths, protocol-relative URLs and API routes. The fragment
/// is dropped, the query string kept.
pub fn normalize_href(href: &str, origin: Option<&str>) -> Option<String> {
    let href = href.trim();
    let path = if href.contains("://") {
        let origin = origin?.trim_end_matches('/');
        let rest = href.strip_prefix(origin)?;
        match rest.chars().next() {
            None => "/".to_string(),
            Some('/') => rest.to_string(),
            Some('?') | Some('#') => format!("/{rest}"),
            // `https://site.example.evil` shares the prefix but not the origin
            Some(_) => return None,
        }
    } else {
        href.to_string()
    };

    if !path.starts_with('/') || path.starts_with("//") {
        return None;
    }
    let path = match path.find('#') {
        Some(i) => path[..i].to_string(),
        None => path,
    };
    if path.starts_with(API_ROUTE_PREFIX) {
        return None;
    }
    Some(path)
}

/// Turns [`LinkEvent`]s into low-priority prefetches.
pub struct LinkObserver {
    dispatcher: PrefetchDispatcher,
    observed: HashSet<String>,
}

impl LinkObserver {
    pub fn new(dispatcher: PrefetchDispatcher) -> Self {
        Self {
            dispatcher,
            observed: HashSet::new(),
        }
    }

    /// Start observing `hrefs`. Returns how many were newly observed.
    pub fn observe<I, S>(&mut self, hrefs: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origin = self.dispatcher.config().origin.clone();
        let mut added = 0;
        for href in hrefs {
            let href = href.as_ref();
            if !href.starts_with('/') {
                trace!(href, "link not root-relative, not observed");
                continue;
            }
            if let Some(route) = normalize_href(href, origin.as_deref()) {
                if self.observed.insert(route) {
                    added += 1;
                }
            }
        }
        added
    }

    pub fn is_observed(&self, href: &str) -> bool {
        normalize_href(href, self.dispatcher.config().origin.as_deref())
            .is_some_and(|route| self.observed.contains(&route))
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Apply one event. Returns the handles of any prefetches it started.
    pub fn handle(&mut self, event: LinkEvent) -> Vec<PrefetchHandle> {
        match event {
            LinkEvent::Inserted(hrefs) => {
                let added = self.observe(hrefs);
                if added > 0 {
                    debug!(added, "observing inserted links");
                }
                Vec::new()
            }
            LinkEvent::Visible(href) => {
                if !self.is_observed(&href) {
                    return Vec::new();
                }
                match self.dispatcher.should_prefetch(&href) {
                    Some(route) => vec![self.dispatcher.prefetch(&route, Priority::Low)],
                    None => Vec::new(),
                }
            }
        }
    }

    /// Consume events until every sender is dropped. The task resolves to
    /// the number of prefetches started.
    pub fn spawn(mut self, mut events: mpsc::Receiver<LinkEvent>) -> JoinHandle<usize> {
        tokio::spawn(async move {
            let mut started = 0;
            while let Some(event) = events.recv().await {
                started += self.handle(event).len();
            }
            debug!(started, "link event channel closed");
            started
        })
    }
}
