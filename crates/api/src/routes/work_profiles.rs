//! Route definitions for work-profile links.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_profiles;
use crate::state::AppState;

/// Routes mounted at `/work-profiles`.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(work_profiles::create))
        .route(
            "/{id}",
            get(work_profiles::get_by_id).delete(work_profiles::delete),
        )
}
