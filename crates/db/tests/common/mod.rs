//! Seed helpers shared by the db integration tests.
//!
//! Skills, profiles, and events are owned outside this crate, so tests insert
//! them with plain SQL.

#![allow(dead_code)]

use folio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

pub async fn seed_skill(pool: &PgPool, name: &str) -> DbId {
    let id = DbId::new_v4();
    sqlx::query("INSERT INTO skills (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn seed_profile(pool: &PgPool, nick_name: &str) -> DbId {
    let id = DbId::new_v4();
    sqlx::query("INSERT INTO profiles (id, nick_name) VALUES ($1, $2)")
        .bind(id)
        .bind(nick_name)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn seed_event(pool: &PgPool, name: &str) -> DbId {
    let id = DbId::new_v4();
    sqlx::query("INSERT INTO events (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Insert an event with an explicit creator and creation time.
pub async fn seed_event_by(
    pool: &PgPool,
    name: &str,
    created_by: Option<DbId>,
    created_at: Timestamp,
) -> DbId {
    let id = DbId::new_v4();
    sqlx::query(
        "INSERT INTO events (id, name, created_by, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $4)",
    )
    .bind(id)
    .bind(name)
    .bind(created_by)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Insert a profile with every optional column filled in.
pub async fn seed_full_profile(pool: &PgPool, nick_name: &str) -> DbId {
    let id = DbId::new_v4();
    sqlx::query(
        "INSERT INTO profiles (id, nick_name, avatar_url, graduation_year, affiliation, bio) \
         VALUES ($1, $2, 'https://cdn/avatar.png', 2026, 'Systems lab', 'Writes compilers')",
    )
    .bind(id)
    .bind(nick_name)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Insert a bare work row with no relations.
pub async fn seed_work(pool: &PgPool, title: &str) -> DbId {
    let id = DbId::new_v4();
    sqlx::query("INSERT INTO works (id, title) VALUES ($1, $2)")
        .bind(id)
        .bind(title)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"));
    count
}

pub fn some(ids: &[DbId]) -> Vec<Option<DbId>> {
    ids.iter().copied().map(Some).collect()
}

pub fn urls(items: &[&str]) -> Vec<Option<String>> {
    items.iter().map(|u| Some(u.to_string())).collect()
}
