//! Read access to the `profiles` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::error::{store_err, RepoError};
use crate::models::profile::Profile;

/// Column list for `profiles` queries.
const COLUMNS: &str =
    "id, nick_name, avatar_url, graduation_year, affiliation, bio, created_at, updated_at";

/// Looks up profiles. Profiles are managed outside this crate.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err("select from", "profiles"))
    }
}
