//! Integration tests for `WorkProfileRepo`: single-link create, delete, and
//! hydrated lookups.

mod common;

use assert_matches::assert_matches;
use common::{count_rows, seed_full_profile, seed_profile, seed_skill, seed_work, some};
use folio_core::types::DbId;
use folio_db::error::{ErrorKind, RepoError};
use folio_db::models::work::CreateWork;
use folio_db::relations::WorkRelation;
use folio_db::repositories::{WorkProfileRepo, WorkRepo};
use folio_db::sync::current_related_ids;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: Create and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_link_appends_to_work_profiles(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let bob = seed_profile(&pool, "bob").await;
    let work = WorkRepo::create(
        &pool,
        &CreateWork {
            title: "Shared".to_string(),
            profile_ids: some(&[alice]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let row = WorkProfileRepo::create(&pool, work, bob).await.unwrap();

    assert_eq!(row.work_id, work);
    assert_eq!(row.profile_id, bob);
    let linked = current_related_ids(&pool, work, WorkRelation::Profiles)
        .await
        .unwrap();
    assert_eq!(linked, vec![alice, bob]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_link_is_conflict(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let work = seed_work(&pool, "Once").await;
    WorkProfileRepo::create(&pool, work, alice).await.unwrap();

    let err = WorkProfileRepo::create(&pool, work, alice).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(count_rows(&pool, "work_profiles").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_link_to_unknown_profile_is_conflict(pool: PgPool) {
    let work = seed_work(&pool, "Lonely").await;

    let err = WorkProfileRepo::create(&pool, work, DbId::new_v4())
        .await
        .unwrap_err();

    assert_matches!(err, RepoError::Store { op: "insert into", table: "work_profiles", .. });
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_link_by_id(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let work = seed_work(&pool, "Unlinked soon").await;
    let row = WorkProfileRepo::create(&pool, work, alice).await.unwrap();

    assert!(WorkProfileRepo::delete(&pool, row.id).await.unwrap());
    assert!(!WorkProfileRepo::delete(&pool, row.id).await.unwrap());

    assert_eq!(count_rows(&pool, "work_profiles").await, 0);
    assert_eq!(count_rows(&pool, "works").await, 1, "the work itself stays");
}

// ---------------------------------------------------------------------------
// Test: Hydrated lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_load_link_hydrates_work_and_profile(pool: PgPool) {
    let skill = seed_skill(&pool, "Rust").await;
    let full = seed_full_profile(&pool, "alice").await;
    let work = WorkRepo::create(
        &pool,
        &CreateWork {
            title: "Hydrated".to_string(),
            skill_ids: some(&[skill]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let row = WorkProfileRepo::create(&pool, work, full).await.unwrap();

    let link = WorkProfileRepo::load(&pool, row.id).await.unwrap();

    assert_eq!(link.id, row.id);
    assert_eq!(link.work.id, work);
    assert_eq!(link.work.skills[0].id, skill);
    assert_eq!(link.work.profile_ids, vec![full]);
    assert_eq!(link.profile.nick_name, "alice");
    assert_eq!(link.profile.graduation_year, Some(2026));
    assert_eq!(link.profile.affiliation.as_deref(), Some("Systems lab"));
    assert_eq!(link.profile.bio.as_deref(), Some("Writes compilers"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_load_link_with_null_profile_fields(pool: PgPool) {
    let bare = seed_profile(&pool, "bob").await;
    let work = seed_work(&pool, "Sparse").await;
    let row = WorkProfileRepo::create(&pool, work, bare).await.unwrap();

    let link = WorkProfileRepo::load(&pool, row.id).await.unwrap();

    assert_eq!(link.profile.graduation_year, None);
    assert_eq!(link.profile.affiliation, None);
    assert_eq!(link.profile.bio, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_load_missing_link_is_not_found(pool: PgPool) {
    let missing = DbId::new_v4();

    let err = WorkProfileRepo::load(&pool, missing).await.unwrap_err();

    assert_matches!(err, RepoError::NotFound { entity: "WorkProfile", id } if id == missing);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_links_by_work_in_link_order(pool: PgPool) {
    let carol = seed_profile(&pool, "carol").await;
    let alice = seed_profile(&pool, "alice").await;
    let bob = seed_profile(&pool, "bob").await;
    let work = WorkRepo::create(
        &pool,
        &CreateWork {
            title: "Team".to_string(),
            profile_ids: some(&[carol, alice, bob]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    seed_work(&pool, "Other").await;

    let links = WorkProfileRepo::list_by_work(&pool, work).await.unwrap();

    let nick_names: Vec<&str> = links.iter().map(|l| l.profile.nick_name.as_str()).collect();
    assert_eq!(nick_names, vec!["carol", "alice", "bob"]);
    assert!(links.iter().all(|l| l.work.id == work && l.work.title == "Team"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_links_by_profile(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let bob = seed_profile(&pool, "bob").await;
    let first = seed_work(&pool, "First").await;
    let second = seed_work(&pool, "Second").await;
    WorkProfileRepo::create(&pool, second, alice).await.unwrap();
    WorkProfileRepo::create(&pool, first, alice).await.unwrap();
    WorkProfileRepo::create(&pool, first, bob).await.unwrap();

    let links = WorkProfileRepo::list_by_profile(&pool, alice).await.unwrap();

    let works: Vec<DbId> = links.iter().map(|l| l.work.id).collect();
    assert_eq!(works, vec![second, first]);
    assert!(links.iter().all(|l| l.profile.id == alice));
    assert_eq!(links[1].work.profile_ids, vec![alice, bob]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_links_for_unknown_ids_is_empty(pool: PgPool) {
    assert!(WorkProfileRepo::list_by_work(&pool, DbId::new_v4())
        .await
        .unwrap()
        .is_empty());
    assert!(WorkProfileRepo::list_by_profile(&pool, DbId::new_v4())
        .await
        .unwrap()
        .is_empty());
}
