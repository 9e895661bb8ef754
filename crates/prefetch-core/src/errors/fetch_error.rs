/// The single failure class of the prefetch subsystem: a prefetch attempt failed.
///
/// Variants only distinguish the cause for logging. Callers never see these;
/// the dispatcher folds them into a `PrefetchOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request aborted: {0}")]
    Aborted(String),

    #[error("malformed response for {key}: {reason}")]
    MalformedResponse { key: String, reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },
}
