//! Collaborator interfaces the prefetch engine drives.
//!
//! All of these live outside the engine (query cache, data layer, router,
//! asset loader, auth context); the host application supplies them.

pub mod asset_loader;
pub mod data_source;
pub mod query_cache;
pub mod router;
pub mod user_context;

pub use asset_loader::{AssetKind, IAssetLoader};
pub use data_source::IDataSource;
pub use query_cache::{IQueryCache, QueryFetcher};
pub use router::IRouter;
pub use user_context::IUserContext;
