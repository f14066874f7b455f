//! Handlers for single work-profile links.
//!
//! Every response carries the link together with its hydrated work and
//! profile.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::validation::parse_id;
use folio_db::repositories::WorkProfileRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /work-profiles`.
#[derive(Debug, Deserialize)]
pub struct CreateWorkProfileRequest {
    pub work_id: String,
    pub profile_id: String,
}

/// POST /api/v1/work-profiles
///
/// Link a profile to a work. An unknown work or profile, or a pair that is
/// already linked, is a 409.
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateWorkProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let work_id = parse_id("work_id", &body.work_id)?;
    let profile_id = parse_id("profile_id", &body.profile_id)?;
    let row = WorkProfileRepo::create(&state.pool, work_id, profile_id).await?;
    let link = WorkProfileRepo::load(&state.pool, row.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// GET /api/v1/work-profiles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("id", &id)?;
    let link = WorkProfileRepo::load(&state.pool, id).await?;
    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/work-profiles/{id}
///
/// Remove the link only; the work and the profile stay.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id("id", &id)?;
    if WorkProfileRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WorkProfile",
            id,
        }))
    }
}

/// GET /api/v1/works/{id}/profiles
pub async fn list_by_work(
    State(state): State<AppState>,
    Path(work_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let work_id = parse_id("work_id", &work_id)?;
    let links = WorkProfileRepo::list_by_work(&state.pool, work_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/profiles/{id}/work-profiles
pub async fn list_by_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile_id = parse_id("profile_id", &profile_id)?;
    let links = WorkProfileRepo::list_by_profile(&state.pool, profile_id).await?;
    Ok(Json(DataResponse { data: links }))
}
