use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::errors::FetchError;
use crate::models::QueryKey;

/// Deferred fetch handed to the query cache. Only polled if the cache decides
/// the entry needs refreshing.
pub type QueryFetcher = BoxFuture<'static, Result<serde_json::Value, FetchError>>;

/// Query-cache population keyed by an opaque key.
///
/// Implementations own their staleness policy: a fresh entry may be kept and
/// the fetcher dropped unpolled.
#[async_trait]
pub trait IQueryCache: Send + Sync {
    async fn prefetch_query(&self, key: QueryKey, fetcher: QueryFetcher) -> Result<(), FetchError>;
}
