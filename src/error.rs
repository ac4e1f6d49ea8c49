//! Error taxonomy for the analysis engine.
//!
//! A missing report is not an error: lookups return `Option<Report>`.

use thiserror::Error;

/// Failures raised while resolving sensor types against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown sensor type: {0}")]
    UnknownSensorType(String),
}

/// Failures raised by a tree store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation.
    #[error("store backend error: {0}")]
    Backend(#[from] sqlx::Error),

    /// A stored document could not be encoded or decoded.
    #[error("malformed document at {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A path addressed a leaf where a subtree was expected, or the reverse.
    #[error("path conflict at {0}")]
    PathConflict(String),
}

/// Errors surfaced by [`crate::AnalysisService`] operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Not retryable; surfaced to the user as a form-validation error.
    #[error(transparent)]
    InvalidSensorType(#[from] CatalogError),

    #[error("invalid user id {0:?}: must be a non-empty path segment")]
    InvalidUserId(String),

    #[error("invalid sensor value {0}: must be a finite number")]
    InvalidValue(f64),

    /// Retryable at the caller's discretion; the engine never retries.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
