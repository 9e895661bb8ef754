use async_trait::async_trait;

use crate::errors::FetchError;

/// Navigation collaborator able to prefetch a route's code bundle.
#[async_trait]
pub trait IRouter: Send + Sync {
    async fn prefetch(&self, route: &str) -> Result<(), FetchError>;
}
