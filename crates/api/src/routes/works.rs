//! Route definitions for works.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{work_profiles, works};
use crate::state::AppState;

/// Routes mounted at `/works`.
///
/// ```text
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/profiles   -> work_profiles::list_by_work
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(works::create))
        .route(
            "/{id}",
            get(works::get_by_id)
                .put(works::update)
                .delete(works::delete),
        )
        .route("/{id}/profiles", get(work_profiles::list_by_work))
}
