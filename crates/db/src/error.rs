//! Repository-level error type.
//!
//! Every store failure carries the operation and table it came from, so a
//! failed synchronization reads as "failed to delete from work_skills: ..."
//! instead of a bare driver message.

use folio_core::error::CoreError;
use folio_core::types::DbId;

/// Error returned by synchronizers, loaders, and repository flows.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The primary entity of a lookup or mutation does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A query or statement failed.
    #[error("failed to {op} {table}: {source}")]
    Store {
        op: &'static str,
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Coarse classification used by callers to decide on retries and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Primary entity absent. Not retryable.
    NotFound,
    /// Connection, pool, or serialization failure. The whole transaction can
    /// be retried from scratch.
    Transient,
    /// Constraint violation, e.g. linking an ID that does not exist.
    Conflict,
    /// Unexpected row shape or decode failure.
    Internal,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Store { source, .. } => classify_sqlx_error(source),
        }
    }

    /// `true` when retrying the enclosing transaction may succeed.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

/// Build a `map_err` adapter that tags a sqlx error with its operation and table.
pub(crate) fn store_err(op: &'static str, table: &'static str) -> impl FnOnce(sqlx::Error) -> RepoError {
    move |source| RepoError::Store { op, table, source }
}

/// Classify a sqlx error.
///
/// PostgreSQL codes: `40001` serialization failure, `40P01` deadlock,
/// `57014` statement cancelled, class `08` connection exceptions are
/// transient; `23505` unique and `23503` foreign-key violations are conflicts.
pub fn classify_sqlx_error(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorKind::Transient,
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("40001" | "40P01" | "57014") => ErrorKind::Transient,
            Some(code) if code.starts_with("08") => ErrorKind::Transient,
            Some("23505" | "23503") => ErrorKind::Conflict,
            _ => ErrorKind::Internal,
        },
        _ => ErrorKind::Internal,
    }
}

impl From<RepoError> for CoreError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            other if other.kind() == ErrorKind::Conflict => CoreError::Conflict(other.to_string()),
            other => CoreError::Internal(other.to_string()),
        }
    }
}
