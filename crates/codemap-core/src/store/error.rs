//! Persistence gateway error types.

use thiserror::Error;

/// Errors surfaced by [`super::AnalysisStore`] backends.
///
/// Kept backend-agnostic so the gateway contract does not leak a concrete
/// database driver to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store rejected an operation or could not allocate an
    /// identifier.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A referenced parent row does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}
