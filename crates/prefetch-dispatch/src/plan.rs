//! Route → prefetch work.

use std::fmt;

use prefetch_core::constants::EMPTY_FILTER_SEGMENT;
use prefetch_core::models::QueryKey;
use prefetch_core::traits::AssetKind;

/// One unit of work inside a prefetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchTask {
    /// Code-split bundle prefetch through the router.
    Bundle,
    /// Query-cache population.
    Data(QueryKey),
    /// Auxiliary asset for high-priority routes.
    Asset { path: String, kind: AssetKind },
}

impl fmt::Display for PrefetchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefetchTask::Bundle => f.write_str("bundle"),
            PrefetchTask::Data(key) => write!(f, "data{key}"),
            PrefetchTask::Asset { path, .. } => write!(f, "asset:{path}"),
        }
    }
}

/// Query keys whose data a visit to `route` will need.
///
/// - `/events` → the unfiltered events list
/// - `/events/{id}/...` → that event
/// - `/dashboard` → dashboard stats, plus the user's registrations
/// - `/profile` → the user's profile with registrations
pub fn plan_for_route(route: &str, user_id: Option<&str>) -> Vec<QueryKey> {
    let path = strip_query(route);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let user_id = user_id.filter(|u| !u.is_empty());

    match segments.as_slice() {
        ["events"] => vec![QueryKey::new(["events", EMPTY_FILTER_SEGMENT])],
        ["events", id, ..] => vec![QueryKey::new(["events", *id])],
        ["dashboard"] => {
            let mut keys = vec![QueryKey::new(["dashboard", "stats"])];
            if user_id.is_some() {
                keys.push(QueryKey::new(["registrations"]));
            }
            keys
        }
        ["profile"] => user_id
            .map(|u| vec![QueryKey::new(["users", u])])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn strip_query(route: &str) -> &str {
    let end = route.find(['?', '#']).unwrap_or(route.len());
    &route[..end]
}
