pub mod events;
pub mod health;
pub mod profiles;
pub mod work_profiles;
pub mod works;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /works                         create (POST)
/// /works/{id}                    get, update (PUT), delete
/// /works/{id}/profiles           profile links of a work
///
/// /work-profiles                 link a profile to a work (POST)
/// /work-profiles/{id}            get, delete one link
///
/// /profiles/{id}/works           works linked to a profile
/// /profiles/{id}/work-profiles   work links of a profile
///
/// /events                        most recent events per creator
/// /events/{id}                   get
/// /events/by-name/{name}         get by exact name
/// /events/{id}/works             works linked to an event
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/works", works::router())
        .nest("/work-profiles", work_profiles::router())
        .nest("/profiles", profiles::router())
        .nest("/events", events::router())
}
