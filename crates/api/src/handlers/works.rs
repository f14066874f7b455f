//! Handlers for the `/works` resource and the per-profile / per-event listings.
//!
//! Request bodies carry identifiers as strings. They are parsed and validated
//! into [`CreateWork`] / [`UpdateWork`] before any database work starts, so a
//! malformed ID never opens a transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_core::validation::{parse_id, parse_optional_ids, validate_image_urls, validate_title};
use folio_db::models::work::{CreateWork, UpdateWork};
use folio_db::repositories::WorkRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /works`.
///
/// Relation lists may contain `null` entries, which are skipped.
#[derive(Debug, Deserialize)]
pub struct CreateWorkRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_id: Option<String>,
    #[serde(default)]
    pub profile_ids: Vec<Option<String>>,
    #[serde(default)]
    pub skill_ids: Vec<Option<String>>,
    #[serde(default)]
    pub event_ids: Vec<Option<String>>,
    #[serde(default)]
    pub image_urls: Vec<Option<String>>,
    #[serde(default)]
    pub diagram_image_urls: Vec<Option<String>>,
}

impl CreateWorkRequest {
    /// Parse identifiers and validate fields.
    pub fn into_input(self) -> Result<CreateWork, CoreError> {
        validate_image_urls("image_urls", &self.image_urls)?;
        validate_image_urls("diagram_image_urls", &self.diagram_image_urls)?;
        Ok(CreateWork {
            title: validate_title(&self.title)?,
            description: self.description,
            event_id: self
                .event_id
                .as_deref()
                .map(|raw| parse_id("event_id", raw))
                .transpose()?,
            profile_ids: parse_optional_ids("profile_ids", &self.profile_ids)?,
            skill_ids: parse_optional_ids("skill_ids", &self.skill_ids)?,
            event_ids: parse_optional_ids("event_ids", &self.event_ids)?,
            image_urls: self.image_urls,
            diagram_image_urls: self.diagram_image_urls,
        })
    }
}

/// Request body for `PUT /works/{id}`.
///
/// Absent fields are left unchanged. A present relation list replaces the
/// relation, so `[]` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_id: Option<String>,
    pub profile_ids: Option<Vec<Option<String>>>,
    pub skill_ids: Option<Vec<Option<String>>>,
    pub event_ids: Option<Vec<Option<String>>>,
    pub image_urls: Option<Vec<Option<String>>>,
    pub diagram_image_urls: Option<Vec<Option<String>>>,
}

impl UpdateWorkRequest {
    /// Parse identifiers and validate the fields that are present.
    pub fn into_input(self) -> Result<UpdateWork, CoreError> {
        if let Some(urls) = &self.image_urls {
            validate_image_urls("image_urls", urls)?;
        }
        if let Some(urls) = &self.diagram_image_urls {
            validate_image_urls("diagram_image_urls", urls)?;
        }
        Ok(UpdateWork {
            title: self.title.as_deref().map(validate_title).transpose()?,
            description: self.description,
            event_id: self
                .event_id
                .as_deref()
                .map(|raw| parse_id("event_id", raw))
                .transpose()?,
            profile_ids: parse_list("profile_ids", self.profile_ids.as_deref())?,
            skill_ids: parse_list("skill_ids", self.skill_ids.as_deref())?,
            event_ids: parse_list("event_ids", self.event_ids.as_deref())?,
            image_urls: self.image_urls,
            diagram_image_urls: self.diagram_image_urls,
        })
    }
}

fn parse_list(
    field: &str,
    raw: Option<&[Option<String>]>,
) -> Result<Option<Vec<Option<DbId>>>, CoreError> {
    raw.map(|ids| parse_optional_ids(field, ids)).transpose()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/works
///
/// Create a work with its relations and return the hydrated aggregate.
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateWorkRequest>,
) -> AppResult<impl IntoResponse> {
    let input = body.into_input()?;
    let id = WorkRepo::create(&state.pool, &input).await?;
    let work = WorkRepo::load_work(&state.pool, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: work })))
}

/// GET /api/v1/works/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("id", &id)?;
    let work = WorkRepo::load_work(&state.pool, id).await?;
    Ok(Json(DataResponse { data: work }))
}

/// PUT /api/v1/works/{id}
///
/// Patch scalar fields and resynchronize every relation present in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateWorkRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("id", &id)?;
    let input = body.into_input()?;
    WorkRepo::update(&state.pool, id, &input).await?;
    let work = WorkRepo::load_work(&state.pool, id).await?;
    Ok(Json(DataResponse { data: work }))
}

/// DELETE /api/v1/works/{id}
///
/// Delete a work and the images it owns.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id("id", &id)?;
    if WorkRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Work", id }))
    }
}

/// GET /api/v1/profiles/{id}/works
///
/// An unknown profile yields an empty list.
pub async fn list_by_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile_id = parse_id("profile_id", &profile_id)?;
    let works = WorkRepo::load_works_by_profile(&state.pool, profile_id).await?;
    Ok(Json(DataResponse { data: works }))
}

/// GET /api/v1/events/{id}/works
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_id("event_id", &event_id)?;
    let works = WorkRepo::load_works_by_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: works }))
}
