//! Route definitions for per-profile listings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{work_profiles, works};
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /{id}/works           -> works::list_by_profile
/// GET    /{id}/work-profiles   -> work_profiles::list_by_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/works", get(works::list_by_profile))
        .route("/{id}/work-profiles", get(work_profiles::list_by_profile))
}
