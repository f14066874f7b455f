//! Repository for the `works` table and everything hanging off it.
//!
//! Reads hydrate a [`Work`] with one query per relation. Writes open a
//! transaction, lock the work row, run the synchronizers from [`crate::sync`],
//! and commit only if every step succeeded.
//!
//! Reads use no transaction. A load racing an update of the same work may see
//! some relations before the update and some after.

use chrono::Utc;
use folio_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{store_err, RepoError};
use crate::models::event::Event;
use crate::models::image::{DiagramImage, Image};
use crate::models::skill::Skill;
use crate::models::work::{CreateWork, UpdateWork, Work, WorkRow};
use crate::relations::{OwnedMedia, WorkRelation};
use crate::sync::{current_related_ids, sync_owned_images, sync_related, SyncOutcome};

/// Column list for `works` queries.
const COLUMNS: &str = "id, title, description, event_id, created_at, updated_at";

/// Same columns qualified with the `w` alias, for JOIN queries.
const QUALIFIED_COLUMNS: &str =
    "w.id, w.title, w.description, w.event_id, w.created_at, w.updated_at";

/// Desired state for the linking relations, `None` meaning "leave as is".
type LinkInputs<'a> = [(WorkRelation, Option<&'a [Option<DbId>]>); 3];

/// Desired state for the owned media, `None` meaning "leave as is".
type MediaInputs<'a> = [(OwnedMedia, Option<&'a [Option<String>]>); 2];

/// Loads and mutates works together with their relations.
pub struct WorkRepo;

impl WorkRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find the bare `works` row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkRow>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = $1");
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err("select from", "works"))
    }

    /// Load a fully hydrated work.
    ///
    /// Returns [`RepoError::NotFound`] when no work has this ID. Relations
    /// with no rows come back as empty collections.
    pub async fn load_work(pool: &PgPool, id: DbId) -> Result<Work, RepoError> {
        let row = Self::find_by_id(pool, id)
            .await?
            .ok_or(RepoError::NotFound { entity: "Work", id })?;
        Self::hydrate(pool, row).await
    }

    /// Load every work linked to a profile, each hydrated independently, in
    /// the order the links were made.
    pub async fn load_works_by_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<Work>, RepoError> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM work_profiles wp \
             JOIN works w ON w.id = wp.work_id \
             WHERE wp.profile_id = $1 \
             ORDER BY wp.link_order"
        );
        let rows = sqlx::query_as::<_, WorkRow>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
            .map_err(store_err("select from", "work_profiles"))?;
        Self::hydrate_all(pool, rows).await
    }

    /// Load every work linked to an event through `work_events`.
    pub async fn load_works_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Work>, RepoError> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM work_events we \
             JOIN works w ON w.id = we.work_id \
             WHERE we.event_id = $1 \
             ORDER BY we.link_order"
        );
        let rows = sqlx::query_as::<_, WorkRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
            .map_err(store_err("select from", "work_events"))?;
        Self::hydrate_all(pool, rows).await
    }

    /// Skills linked to a work, in link order.
    pub async fn skills_for_work(pool: &PgPool, work_id: DbId) -> Result<Vec<Skill>, RepoError> {
        sqlx::query_as::<_, Skill>(
            "SELECT s.id, s.name, s.category, s.created_at, s.updated_at \
             FROM skills s \
             JOIN work_skills ws ON ws.skill_id = s.id \
             WHERE ws.work_id = $1 \
             ORDER BY ws.link_order",
        )
        .bind(work_id)
        .fetch_all(pool)
        .await
        .map_err(store_err("select from", "work_skills"))
    }

    /// Images linked to a work, in the order they were supplied.
    pub async fn images_for_work(pool: &PgPool, work_id: DbId) -> Result<Vec<Image>, RepoError> {
        sqlx::query_as::<_, Image>(
            "SELECT i.id, i.image_url, i.created_at, i.updated_at \
             FROM images i \
             JOIN work_images wi ON wi.image_id = i.id \
             WHERE wi.work_id = $1 \
             ORDER BY wi.sort_order, wi.created_at",
        )
        .bind(work_id)
        .fetch_all(pool)
        .await
        .map_err(store_err("select from", "work_images"))
    }

    /// Diagram images linked to a work, in the order they were supplied.
    pub async fn diagram_images_for_work(
        pool: &PgPool,
        work_id: DbId,
    ) -> Result<Vec<DiagramImage>, RepoError> {
        sqlx::query_as::<_, DiagramImage>(
            "SELECT di.id, di.image_url, di.created_at, di.updated_at \
             FROM diagram_images di \
             JOIN work_diagram_images wdi ON wdi.diagram_image_id = di.id \
             WHERE wdi.work_id = $1 \
             ORDER BY wdi.sort_order, wdi.created_at",
        )
        .bind(work_id)
        .fetch_all(pool)
        .await
        .map_err(store_err("select from", "work_diagram_images"))
    }

    /// Events linked to a work through `work_events`, in link order.
    pub async fn events_for_work(pool: &PgPool, work_id: DbId) -> Result<Vec<Event>, RepoError> {
        sqlx::query_as::<_, Event>(
            "SELECT e.id, e.name, e.description, e.location, e.start_date, e.end_date, \
                    e.created_by, e.created_at, e.updated_at \
             FROM events e \
             JOIN work_events we ON we.event_id = e.id \
             WHERE we.work_id = $1 \
             ORDER BY we.link_order",
        )
        .bind(work_id)
        .fetch_all(pool)
        .await
        .map_err(store_err("select from", "work_events"))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a work and all of its relations in one transaction.
    ///
    /// Returns the new work's ID.
    pub async fn create(pool: &PgPool, input: &CreateWork) -> Result<DbId, RepoError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(store_err("begin transaction on", "works"))?;

        let id = DbId::new_v4();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO works (id, title, description, event_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.event_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(store_err("insert into", "works"))?;

        Self::sync_relations(
            &mut tx,
            id,
            [
                (WorkRelation::Skills, Some(&input.skill_ids[..])),
                (WorkRelation::Profiles, Some(&input.profile_ids[..])),
                (WorkRelation::Events, Some(&input.event_ids[..])),
            ],
            [
                (OwnedMedia::Images, Some(&input.image_urls[..])),
                (OwnedMedia::DiagramImages, Some(&input.diagram_image_urls[..])),
            ],
        )
        .await?;

        tx.commit().await.map_err(store_err("commit", "works"))?;
        tracing::info!(work_id = %id, "Work created");
        Ok(id)
    }

    /// Patch a work and resynchronize the relations present in `input`.
    ///
    /// The work row is locked for the whole transaction, so concurrent updates
    /// of the same work run one after the other instead of interleaving their
    /// diffs. Returns the combined outcome of the linking relations.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWork,
    ) -> Result<SyncOutcome, RepoError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(store_err("begin transaction on", "works"))?;

        Self::lock_for_update(&mut tx, id)
            .await?
            .ok_or(RepoError::NotFound { entity: "Work", id })?;

        sqlx::query(
            "UPDATE works SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                event_id = COALESCE($4, event_id), \
                updated_at = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.event_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(store_err("update", "works"))?;

        let links = Self::sync_relations(
            &mut tx,
            id,
            [
                (WorkRelation::Skills, input.skill_ids.as_deref()),
                (WorkRelation::Profiles, input.profile_ids.as_deref()),
                (WorkRelation::Events, input.event_ids.as_deref()),
            ],
            [
                (OwnedMedia::Images, input.image_urls.as_deref()),
                (OwnedMedia::DiagramImages, input.diagram_image_urls.as_deref()),
            ],
        )
        .await?;

        tx.commit().await.map_err(store_err("commit", "works"))?;
        tracing::info!(
            work_id = %id,
            links_added = links.added,
            links_removed = links.removed,
            links_unchanged = links.is_noop(),
            "Work updated"
        );
        Ok(links)
    }

    /// Delete a work together with the media it owns.
    ///
    /// Join rows to skills, profiles, and events cascade. Returns `true` if a
    /// work was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(store_err("begin transaction on", "works"))?;

        if Self::lock_for_update(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        for media in OwnedMedia::ALL {
            sync_owned_images(&mut tx, id, &[], media).await?;
        }

        sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err("delete from", "works"))?;

        tx.commit().await.map_err(store_err("commit", "works"))?;
        tracing::info!(work_id = %id, "Work deleted");
        Ok(true)
    }

    /// Lock a work row (`SELECT ... FOR UPDATE`) for the rest of `tx`.
    ///
    /// Returns `None` if the work does not exist.
    pub async fn lock_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<WorkRow>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(store_err("lock", "works"))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Populate every relation of a work row.
    async fn hydrate(pool: &PgPool, row: WorkRow) -> Result<Work, RepoError> {
        let mut work = Work::from(row);

        work.skills = Self::skills_for_work(pool, work.id).await?;

        work.images = Self::images_for_work(pool, work.id).await?;
        work.image_ids = work.images.iter().map(|image| image.id).collect();

        work.diagram_images = Self::diagram_images_for_work(pool, work.id).await?;
        work.diagram_image_urls = work
            .diagram_images
            .iter()
            .map(|image| image.image_url.clone())
            .collect();

        work.profile_ids = current_related_ids(pool, work.id, WorkRelation::Profiles).await?;
        work.events = Self::events_for_work(pool, work.id).await?;

        Ok(work)
    }

    /// Hydrate several rows one after the other (one query set per work).
    async fn hydrate_all(pool: &PgPool, rows: Vec<WorkRow>) -> Result<Vec<Work>, RepoError> {
        let mut works = Vec::with_capacity(rows.len());
        for row in rows {
            works.push(Self::hydrate(pool, row).await?);
        }
        Ok(works)
    }

    /// Run the synchronizers whose desired state is present.
    ///
    /// Returns the summed outcome of the linking relations. Stops at the first
    /// failure; the caller's transaction is then dropped without commit.
    async fn sync_relations(
        tx: &mut Transaction<'_, Postgres>,
        work_id: DbId,
        links: LinkInputs<'_>,
        media: MediaInputs<'_>,
    ) -> Result<SyncOutcome, RepoError> {
        let mut total = SyncOutcome::default();
        for (relation, desired) in links {
            if let Some(desired) = desired {
                total.merge(sync_related(tx, work_id, desired, relation).await?);
            }
        }
        for (kind, urls) in media {
            if let Some(urls) = urls {
                sync_owned_images(tx, work_id, urls, kind).await?;
            }
        }
        Ok(total)
    }
}
