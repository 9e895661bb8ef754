//! Error handling for the prefetch engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod fetch_error;

pub use config_error::ConfigError;
pub use fetch_error::FetchError;

/// Umbrella error for fallible prefetch-engine operations.
///
/// Prefetch attempts themselves never surface errors to callers; this type
/// covers setup paths such as loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum PrefetchError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("no async runtime available: {0}")]
    RuntimeUnavailable(String),
}

/// Convenience result alias.
pub type PrefetchResult<T> = Result<T, PrefetchError>;
