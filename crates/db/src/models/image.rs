//! Owned media models.
//!
//! Image rows are created fresh on every synchronization and deleted once no
//! work links them, so their IDs are not stable across updates.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `diagram_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiagramImage {
    pub id: DbId,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
