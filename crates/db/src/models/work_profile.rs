//! Work-profile link model.
//!
//! A `work_profiles` row is addressable by its own `id` in addition to the
//! `(work_id, profile_id)` pair, so a single link can be fetched or removed.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::profile::Profile;
use super::work::Work;

/// A row from the `work_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkProfileRow {
    pub id: DbId,
    pub work_id: DbId,
    pub profile_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A link with the work and the profile it connects.
#[derive(Debug, Clone, Serialize)]
pub struct WorkProfile {
    pub id: DbId,
    pub work_id: DbId,
    pub profile_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub work: Work,
    pub profile: Profile,
}

impl WorkProfile {
    pub fn new(row: WorkProfileRow, work: Work, profile: Profile) -> Self {
        Self {
            id: row.id,
            work_id: row.work_id,
            profile_id: row.profile_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            work,
            profile,
        }
    }
}
