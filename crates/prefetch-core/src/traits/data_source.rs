use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::QueryKey;

/// The data layer behind the query cache (events, registrations, profiles,
/// dashboard analytics).
#[async_trait]
pub trait IDataSource: Send + Sync {
    async fn fetch(&self, key: &QueryKey) -> Result<serde_json::Value, FetchError>;
}
