//! Muninn error types

/// Muninn error types
///
/// The registry itself performs no validation that can fail; every variant
/// here originates in a backend collaborator and propagates unchanged to the
/// caller of [`MetricRegistry::get`](crate::MetricRegistry::get).
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    /// A family with this name is already owned by the backend registry.
    #[error("metric family '{0}' is already registered")]
    DuplicateFamily(String),

    /// Histogram bucket boundaries were rejected at instance construction.
    #[error("invalid histogram buckets: {0}")]
    InvalidBuckets(String),

    /// Failure surfaced by an external backend implementation.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type alias for Muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;
