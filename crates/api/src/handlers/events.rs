//! Read-only event lookups.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::validation::parse_id;
use folio_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
///
/// The most recent events of each creator.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_recent(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("id", &id)?;
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// GET /api/v1/events/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event named '{name}' not found")))?;
    Ok(Json(DataResponse { data: event }))
}
