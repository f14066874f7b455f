//! Repository for individual `work_profiles` links.
//!
//! [`WorkRepo`] keeps a work's profile set in sync as a whole. This repository
//! handles one link at a time, addressed by the link's own ID, and returns
//! links with both ends hydrated.

use chrono::Utc;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::error::{store_err, RepoError};
use crate::models::profile::Profile;
use crate::models::work_profile::{WorkProfile, WorkProfileRow};
use crate::repositories::{ProfileRepo, WorkRepo};

/// Column list for `work_profiles` queries.
const COLUMNS: &str = "id, work_id, profile_id, created_at, updated_at";

/// Creates, removes, and loads single work-profile links.
pub struct WorkProfileRepo;

impl WorkProfileRepo {
    /// Link a profile to a work.
    ///
    /// The new link goes after every existing link of the work. Linking the
    /// same pair twice violates `uq_work_profiles` and fails as a conflict.
    pub async fn create(
        pool: &PgPool,
        work_id: DbId,
        profile_id: DbId,
    ) -> Result<WorkProfileRow, RepoError> {
        let query = format!(
            "INSERT INTO work_profiles (work_id, profile_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WorkProfileRow>(&query)
            .bind(work_id)
            .bind(profile_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
            .map_err(store_err("insert into", "work_profiles"))?;
        tracing::info!(link_id = %row.id, %work_id, %profile_id, "Work profile linked");
        Ok(row)
    }

    /// Remove one link by its ID. Returns `true` if a link was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM work_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(store_err("delete from", "work_profiles"))?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(link_id = %id, "Work profile unlinked");
        }
        Ok(deleted)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkProfileRow>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM work_profiles WHERE id = $1");
        sqlx::query_as::<_, WorkProfileRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err("select from", "work_profiles"))
    }

    /// Load one link with its work and profile.
    ///
    /// Returns [`RepoError::NotFound`] when no link has this ID.
    pub async fn load(pool: &PgPool, id: DbId) -> Result<WorkProfile, RepoError> {
        let row = Self::find_by_id(pool, id)
            .await?
            .ok_or(RepoError::NotFound { entity: "WorkProfile", id })?;
        let work = WorkRepo::load_work(pool, row.work_id).await?;
        let profile = Self::profile(pool, row.profile_id).await?;
        Ok(WorkProfile::new(row, work, profile))
    }

    /// Every link of a work, in link order. An unknown work yields an empty list.
    pub async fn list_by_work(pool: &PgPool, work_id: DbId) -> Result<Vec<WorkProfile>, RepoError> {
        let rows = Self::rows_where(pool, "work_id", work_id).await?;
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let work = WorkRepo::load_work(pool, first.work_id).await?;

        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            let profile = Self::profile(pool, row.profile_id).await?;
            links.push(WorkProfile::new(row, work.clone(), profile));
        }
        Ok(links)
    }

    /// Every link of a profile, in link order. Each work is hydrated
    /// independently.
    pub async fn list_by_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<WorkProfile>, RepoError> {
        let rows = Self::rows_where(pool, "profile_id", profile_id).await?;
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let profile = Self::profile(pool, first.profile_id).await?;

        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            let work = WorkRepo::load_work(pool, row.work_id).await?;
            links.push(WorkProfile::new(row, work, profile.clone()));
        }
        Ok(links)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// `column` is a compiled-in literal, never request data.
    async fn rows_where(
        pool: &PgPool,
        column: &'static str,
        id: DbId,
    ) -> Result<Vec<WorkProfileRow>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_profiles WHERE {column} = $1 ORDER BY link_order"
        );
        sqlx::query_as::<_, WorkProfileRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
            .map_err(store_err("select from", "work_profiles"))
    }

    async fn profile(pool: &PgPool, id: DbId) -> Result<Profile, RepoError> {
        ProfileRepo::find_by_id(pool, id)
            .await?
            .ok_or(RepoError::NotFound { entity: "Profile", id })
    }
}
