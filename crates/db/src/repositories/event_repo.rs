//! Read access to the `events` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::error::{store_err, RepoError};
use crate::models::event::Event;

/// Column list for `events` queries.
const COLUMNS: &str =
    "id, name, description, location, start_date, end_date, created_by, created_at, updated_at";

/// How many of each creator's events [`EventRepo::list_recent`] returns.
pub const RECENT_PER_CREATOR: i64 = 10;

/// Looks up events. Events are managed outside this crate.
pub struct EventRepo;

impl EventRepo {
    /// The newest [`RECENT_PER_CREATOR`] events of every creator.
    ///
    /// Events without a creator form one group of their own. Results are
    /// grouped by creator, newest first within each group.
    pub async fn list_recent(pool: &PgPool) -> Result<Vec<Event>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM ( \
                SELECT {COLUMNS}, \
                       ROW_NUMBER() OVER (PARTITION BY created_by ORDER BY created_at DESC, id) AS rn \
                FROM events \
             ) ranked \
             WHERE rn <= $1 \
             ORDER BY created_by NULLS LAST, created_at DESC, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(RECENT_PER_CREATOR)
            .fetch_all(pool)
            .await
            .map_err(store_err("select from", "events"))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err("select from", "events"))
    }

    /// Find an event by exact name.
    ///
    /// Names are not unique; the oldest matching event wins.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Event>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE name = $1 ORDER BY created_at, id LIMIT 1"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(store_err("select from", "events"))
    }
}
