use jobly_core::error::CoreError;

/// Failure of a repository operation.
///
/// Domain failures (missing rows, rejected input) stay distinct from driver
/// failures so the HTTP layer can map each to its own status.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
