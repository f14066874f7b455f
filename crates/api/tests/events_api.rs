//! HTTP-level integration tests for event lookups.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seed_event};
use folio_core::types::DbId;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_events(pool: PgPool) {
    seed_event(&pool, "Expo").await;
    seed_event(&pool, "Demo day").await;

    let response = get(build_test_app(pool), "/api/v1/events").await;

    assert_eq!(response.status(), StatusCode::OK);
    let events = body_json(response).await["data"].clone();
    assert_eq!(events.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_events_empty(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/events").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_event_by_id(pool: PgPool) {
    let id = seed_event(&pool, "Expo").await;

    let response = get(build_test_app(pool), &format!("/api/v1/events/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let event = body_json(response).await["data"].clone();
    assert_eq!(event["id"], id.to_string());
    assert_eq!(event["name"], "Expo");
    assert!(event["created_by"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_event_returns_404(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/events/{}", DbId::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_event_by_name(pool: PgPool) {
    let id = seed_event(&pool, "Demo day").await;

    let response = get(build_test_app(pool), "/api/v1/events/by-name/Demo%20day").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_event_name_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/events/by-name/Nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Event named 'Nowhere' not found");
}
