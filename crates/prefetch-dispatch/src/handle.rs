//! Cloneable handle to a (possibly shared) prefetch attempt.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

use prefetch_core::models::PrefetchOutcome;

pub(crate) type SharedOutcome = Shared<BoxFuture<'static, PrefetchOutcome>>;

/// Resolves to the outcome of the prefetch attempt for a route.
///
/// Every caller that joined the same attempt receives the same outcome.
/// Dropping the handle does not cancel the attempt.
#[derive(Clone)]
pub struct PrefetchHandle {
    route: String,
    shared: SharedOutcome,
    joined_existing: bool,
}

impl PrefetchHandle {
    pub(crate) fn new(route: String, shared: SharedOutcome) -> Self {
        Self {
            route,
            shared,
            joined_existing: false,
        }
    }

    /// An already-resolved handle.
    pub(crate) fn ready(outcome: PrefetchOutcome) -> Self {
        let route = outcome.route.clone();
        Self::new(route, futures::future::ready(outcome).boxed().shared())
    }

    /// A second handle onto the same attempt, marked as a join.
    pub(crate) fn joined(&self) -> Self {
        Self {
            route: self.route.clone(),
            shared: self.shared.clone(),
            joined_existing: true,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// True when this call was deduplicated onto an earlier attempt.
    pub fn joined_existing(&self) -> bool {
        self.joined_existing
    }

    /// The outcome, if the attempt already settled.
    pub fn peek(&self) -> Option<&PrefetchOutcome> {
        self.shared.peek()
    }
}

impl Future for PrefetchHandle {
    type Output = PrefetchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.shared.poll_unpin(cx)
    }
}

impl std::fmt::Debug for PrefetchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchHandle")
            .field("route", &self.route)
            .field("joined_existing", &self.joined_existing)
            .field("settled", &self.peek().is_some())
            .finish()
    }
}
