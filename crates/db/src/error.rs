//! Repository error type.
//!
//! Most repository methods return plain `sqlx::Error`. Methods that enforce a
//! domain rule (entry validation, not-found on mutation, unique conflicts)
//! return [`RepoError`] so callers can tell those outcomes apart from a
//! storage failure.

use ironlog_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A domain outcome: validation, conflict, or not-found.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any other storage failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result alias for repository methods that return [`RepoError`].
pub type RepoResult<T> = Result<T, RepoError>;

/// Convert a unique-constraint violation into `CoreError::Conflict`.
///
/// `describe` maps the violated constraint name to a human-readable message.
/// Any other error passes through as [`RepoError::Database`].
pub(crate) fn map_unique_violation(
    err: sqlx::Error,
    describe: impl Fn(&str) -> String,
) -> RepoError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return RepoError::Core(CoreError::Conflict(describe(constraint)));
        }
    }
    RepoError::Database(err)
}
