//! Profile model. Profiles are owned elsewhere; works only link to them.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
///
/// `graduation_year`, `affiliation`, and `bio` are nullable in the schema.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub nick_name: String,
    pub avatar_url: String,
    pub graduation_year: Option<i32>,
    pub affiliation: Option<String>,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
