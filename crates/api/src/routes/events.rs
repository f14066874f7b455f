//! Route definitions for events.

use axum::routing::get;
use axum::Router;

use crate::handlers::{events, works};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                  -> list
/// GET    /{id}              -> get_by_id
/// GET    /by-name/{name}    -> get_by_name
/// GET    /{id}/works        -> works::list_by_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list))
        .route("/{id}", get(events::get_by_id))
        .route("/by-name/{name}", get(events::get_by_name))
        .route("/{id}/works", get(works::list_by_event))
}
