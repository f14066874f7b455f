use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_db::error::{ErrorKind, RepoError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation and domain errors and [`RepoError`]
/// for persistence failures. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository or synchronizer error from `folio_db`.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// A lookup by something other than an ID, or an unknown route.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request body could not be read as the expected JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const TRANSIENT_MESSAGE: &str = "The data store is temporarily unavailable, retry the request";

/// Seconds a client should wait before retrying after a transient failure.
const RETRY_AFTER_SECS: &str = "1";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Repository errors ---
            AppError::Repo(err) => classify_repo_error(err),

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        if matches!(&self, AppError::Repo(err) if err.is_transient()) {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Map a repository error to an HTTP status, error code, and sanitized message.
///
/// - Transient failures (pool, connection, serialization, deadlock) map to 503.
/// - Unique and foreign-key violations map to 409.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500; details are logged, never returned.
fn classify_repo_error(err: &RepoError) -> ErrorParts {
    let RepoError::Store { op, table, source } = err else {
        return (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string());
    };
    match err.kind() {
        ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        ErrorKind::Transient => {
            tracing::warn!(op, table, error = %source, "Transient store error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "TRANSIENT_STORE_ERROR",
                TRANSIENT_MESSAGE.to_string(),
            )
        }
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", conflict_message(source, table)),
        ErrorKind::Internal => {
            tracing::error!(op, table, error = %source, "Database error");
            internal()
        }
    }
}

fn conflict_message(err: &sqlx::Error, table: &str) -> String {
    let sqlx::Error::Database(db_err) = err else {
        return "Conflicting change".to_string();
    };
    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23503") => format!("Referenced record does not exist ({table}: {constraint})"),
        _ => format!("Duplicate value violates unique constraint: {constraint}"),
    }
}
