//! Relation synchronization for a single work.
//!
//! Both synchronizers run inside a caller-supplied transaction and never
//! commit or roll back themselves. The caller commits only when every
//! synchronizer for the request has succeeded; on the first error the
//! transaction is dropped and PostgreSQL discards all of it.
//!
//! Neither function locks anything. Two transactions syncing the same work
//! concurrently can interleave their read-diff-write steps; callers that need
//! serialization take a row lock on the work first (see
//! [`WorkRepo::lock_for_update`](crate::repositories::WorkRepo::lock_for_update)).

use chrono::Utc;
use folio_core::diff::{compute_diff, flatten_ids};
use folio_core::types::DbId;
use serde::Serialize;
use sqlx::{Executor, Postgres, Transaction};

use crate::error::{store_err, RepoError};
use crate::relations::{OwnedMedia, WorkRelation, LINK_ORDER_COLUMN, WORK_COLUMN};

/// Row counts written by one synchronizer call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub added: u64,
    pub removed: u64,
}

impl SyncOutcome {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    /// Add another call's counts to this one.
    pub fn merge(&mut self, other: SyncOutcome) {
        self.added += other.added;
        self.removed += other.removed;
    }
}

/// Read the related IDs currently linked to `work_id`, in link order.
///
/// Accepts any executor so the loader can read through the pool while the
/// synchronizer reads through its transaction.
pub async fn current_related_ids<'e, E>(
    executor: E,
    work_id: DbId,
    relation: WorkRelation,
) -> Result<Vec<DbId>, RepoError>
where
    E: Executor<'e, Database = Postgres>,
{
    let query = format!(
        "SELECT {related} FROM {table} WHERE {owner} = $1 ORDER BY {order}",
        related = relation.related_column(),
        table = relation.table(),
        owner = relation.owner_column(),
        order = LINK_ORDER_COLUMN,
    );
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(work_id)
        .fetch_all(executor)
        .await
        .map_err(store_err("select from", relation.table()))
}

/// Make the join rows of `relation` for `work_id` match `desired` exactly.
///
/// `None` entries are ignored and duplicates collapse. Rows present in both
/// the current and desired sets are left untouched, so their timestamps and
/// position survive. New links are appended in the order they appear in
/// `desired`. Removals run before additions, each as a single statement.
#[tracing::instrument(skip(tx, desired), fields(table = relation.table()))]
pub async fn sync_related(
    tx: &mut Transaction<'_, Postgres>,
    work_id: DbId,
    desired: &[Option<DbId>],
    relation: WorkRelation,
) -> Result<SyncOutcome, RepoError> {
    let current = current_related_ids(&mut **tx, work_id, relation).await?;
    let desired = flatten_ids(desired);
    let diff = compute_diff(&current, &desired);

    let mut outcome = SyncOutcome::default();
    if diff.is_empty() {
        tracing::debug!(%work_id, "Relation already in sync");
        return Ok(outcome);
    }

    if !diff.to_remove.is_empty() {
        let query = format!(
            "DELETE FROM {table} WHERE {owner} = $1 AND {related} = ANY($2)",
            table = relation.table(),
            owner = relation.owner_column(),
            related = relation.related_column(),
        );
        let result = sqlx::query(&query)
            .bind(work_id)
            .bind(&diff.to_remove)
            .execute(&mut **tx)
            .await
            .map_err(store_err("delete from", relation.table()))?;
        outcome.removed = result.rows_affected();
    }

    if !diff.to_add.is_empty() {
        let query = format!(
            "INSERT INTO {table} ({owner}, {related}, created_at, updated_at) \
             SELECT $1, id, $3, $3 FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(id, ord) \
             ORDER BY ord",
            table = relation.table(),
            owner = relation.owner_column(),
            related = relation.related_column(),
        );
        let result = sqlx::query(&query)
            .bind(work_id)
            .bind(&diff.to_add)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await
            .map_err(store_err("insert into", relation.table()))?;
        outcome.added = result.rows_affected();
    }

    tracing::debug!(
        %work_id,
        added = outcome.added,
        removed = outcome.removed,
        "Relation synchronized"
    );
    Ok(outcome)
}

/// Replace every `media` entity linked to `work_id` with fresh rows for `urls`.
///
/// Always deletes the work's join rows and then every entity row no join row
/// references any more, even when `urls` is empty, so an empty list clears
/// the work's media. Each non-`None` URL then gets a new entity row with a new
/// ID and a join row recording its position in `urls`.
#[tracing::instrument(skip(tx, urls), fields(table = media.join_table()))]
pub async fn sync_owned_images(
    tx: &mut Transaction<'_, Postgres>,
    work_id: DbId,
    urls: &[Option<String>],
    media: OwnedMedia,
) -> Result<SyncOutcome, RepoError> {
    let unlink = format!(
        "DELETE FROM {join} WHERE {owner} = $1",
        join = media.join_table(),
        owner = WORK_COLUMN,
    );
    let unlinked = sqlx::query(&unlink)
        .bind(work_id)
        .execute(&mut **tx)
        .await
        .map_err(store_err("delete from", media.join_table()))?;

    let cleanup = format!(
        "DELETE FROM {entity} e \
         WHERE NOT EXISTS (SELECT 1 FROM {join} j WHERE j.{related} = e.id)",
        entity = media.entity_table(),
        join = media.join_table(),
        related = media.join_related_column(),
    );
    let orphans = sqlx::query(&cleanup)
        .execute(&mut **tx)
        .await
        .map_err(store_err("clean up", media.entity_table()))?;

    let urls: Vec<String> = urls.iter().flatten().cloned().collect();
    let mut outcome = SyncOutcome {
        added: 0,
        removed: unlinked.rows_affected(),
    };

    if !urls.is_empty() {
        let ids: Vec<DbId> = urls.iter().map(|_| DbId::new_v4()).collect();
        let now = Utc::now();

        let insert_entities = format!(
            "INSERT INTO {entity} (id, image_url, created_at, updated_at) \
             SELECT id, url, $3, $3 FROM UNNEST($1::uuid[], $2::text[]) AS t(id, url)",
            entity = media.entity_table(),
        );
        let inserted = sqlx::query(&insert_entities)
            .bind(&ids)
            .bind(&urls)
            .bind(now)
            .execute(&mut **tx)
            .await
            .map_err(store_err("insert into", media.entity_table()))?;

        let insert_links = format!(
            "INSERT INTO {join} ({owner}, {related}, sort_order, created_at, updated_at) \
             SELECT $1, id, (ord - 1)::int, $3, $3 \
             FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(id, ord)",
            join = media.join_table(),
            owner = WORK_COLUMN,
            related = media.join_related_column(),
        );
        sqlx::query(&insert_links)
            .bind(work_id)
            .bind(&ids)
            .bind(now)
            .execute(&mut **tx)
            .await
            .map_err(store_err("insert into", media.join_table()))?;

        outcome.added = inserted.rows_affected();
    }

    tracing::debug!(
        %work_id,
        added = outcome.added,
        removed = outcome.removed,
        orphans_deleted = orphans.rows_affected(),
        "Owned media replaced"
    );
    Ok(outcome)
}
