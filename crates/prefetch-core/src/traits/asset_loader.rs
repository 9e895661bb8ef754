use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::IMAGE_EXTENSIONS;
use crate::errors::FetchError;

/// How an auxiliary asset is warmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Decoded through an image element.
    Image,
    /// Injected as a `<link rel="prefetch">`.
    Link,
}

impl AssetKind {
    pub fn of(asset: &str) -> Self {
        if IMAGE_EXTENSIONS.iter().any(|ext| asset.ends_with(ext)) {
            AssetKind::Image
        } else {
            AssetKind::Link
        }
    }
}

/// Loader for images and stylesheets belonging to a route.
#[async_trait]
pub trait IAssetLoader: Send + Sync {
    async fn load(&self, asset: &str, kind: AssetKind) -> Result<(), FetchError>;
}
