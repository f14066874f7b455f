//! Work model: the row, the hydrated aggregate, and mutation inputs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::event::Event;
use super::image::{DiagramImage, Image};
use super::skill::Skill;

/// A row from the `works` table.
///
/// `event_id` is nullable in the schema and stays `None` unless the column
/// holds a value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub event_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A work with every relation loaded.
#[derive(Debug, Clone, Serialize)]
pub struct Work {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub event_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Profiles linked through `work_profiles`.
    pub profile_ids: Vec<DbId>,
    pub skills: Vec<Skill>,
    pub images: Vec<Image>,
    /// IDs of `images`, in the same order.
    pub image_ids: Vec<DbId>,
    pub diagram_images: Vec<DiagramImage>,
    /// URLs of `diagram_images`, in the same order.
    pub diagram_image_urls: Vec<String>,
    pub events: Vec<Event>,
}

impl From<WorkRow> for Work {
    fn from(row: WorkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            event_id: row.event_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            profile_ids: Vec::new(),
            skills: Vec::new(),
            images: Vec::new(),
            image_ids: Vec::new(),
            diagram_images: Vec::new(),
            diagram_image_urls: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Validated input for creating a work together with its relations.
///
/// `None` list entries mean "no relation" and are skipped.
#[derive(Debug, Clone, Default)]
pub struct CreateWork {
    pub title: String,
    pub description: String,
    pub event_id: Option<DbId>,
    pub profile_ids: Vec<Option<DbId>>,
    pub skill_ids: Vec<Option<DbId>>,
    pub event_ids: Vec<Option<DbId>>,
    pub image_urls: Vec<Option<String>>,
    pub diagram_image_urls: Vec<Option<String>>,
}

/// Validated patch for an existing work.
///
/// Scalar fields use `COALESCE` semantics. A relation list left as `None` is
/// not touched; `Some(vec![])` clears the relation.
#[derive(Debug, Clone, Default)]
pub struct UpdateWork {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_id: Option<DbId>,
    pub profile_ids: Option<Vec<Option<DbId>>>,
    pub skill_ids: Option<Vec<Option<DbId>>>,
    pub event_ids: Option<Vec<Option<DbId>>>,
    pub image_urls: Option<Vec<Option<String>>>,
    pub diagram_image_urls: Option<Vec<Option<String>>>,
}
