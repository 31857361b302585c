//! HTTP-level integration tests for asset CRUD, resources, and custom
//! state endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use sqlx::PgPool;

fn asset_payload(uuid: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "uuid": uuid,
        "name": name,
        "creator_account": "creator#1",
        "owner_account": "user#1",
    })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_asset_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assets", asset_payload("sword-1", "Iron Sword")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["uuid"], "sword-1");
    assert_eq!(json["data"]["name"], "Iron Sword");
    assert_eq!(json["data"]["class_id"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_blank_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assets", asset_payload("sword-1", "   ")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_duplicate_uuid_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("dup-1", "First")).await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assets", asset_payload("dup-1", "Second")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_duplicate_slot_names(pool: PgPool) {
    let mut payload = asset_payload("avatar-1", "Avatar");
    payload["equipment_slots"] = serde_json::json!([
        {"slot_name": "weapon"},
        {"slot_name": "weapon"},
    ]);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assets", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_related_records(pool: PgPool) {
    let mut payload = asset_payload("avatar-1", "Avatar");
    payload["resources"] = serde_json::json!([
        {"resource_type": "sprite", "uri": "ipfs://sprite.png", "priority": 0},
    ]);
    payload["equipment_slots"] = serde_json::json!([{"slot_name": "weapon"}]);
    payload["custom_state"] = serde_json::json!({"mood": "neutral"});

    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", payload).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets/avatar-1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["asset"]["uuid"], "avatar-1");
    assert_eq!(data["resources"].as_array().unwrap().len(), 1);
    assert_eq!(data["equipment_slots"][0]["slot_name"], "weapon");
    assert_eq!(data["custom_state"][0]["state_key"], "mood");
    assert_eq!(data["children"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_selects_primary_resource_for_context(pool: PgPool) {
    let mut payload = asset_payload("avatar-1", "Avatar");
    payload["resources"] = serde_json::json!([
        {"resource_type": "sprite", "uri": "ipfs://thumb.png", "priority": 5,
         "context_tags": ["thumbnail"]},
        {"resource_type": "sprite", "uri": "ipfs://full.png", "priority": 0,
         "context_tags": ["portrait"]},
    ]);

    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", payload).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/assets/avatar-1?context=thumbnail").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["primary_resource"]["uri"], "ipfs://thumb.png");

    // Without a context the lowest priority value wins overall.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets/avatar-1").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["primary_resource"]["uri"], "ipfs://full.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_unknown_asset_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets/ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ASSET_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_updates_allowed_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("hero-1", "Hero")).await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        "/api/v1/assets/hero-1",
        serde_json::json!({"level": 5, "experience_points": 900}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["level"], 5);
    assert_eq!(json["data"]["experience_points"], 900);
    assert_eq!(json["data"]["name"], "Hero");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_rejects_empty_body(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("hero-1", "Hero")).await;

    let app = common::build_test_app(pool);
    let response = patch_json(app, "/api/v1/assets/hero-1", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_unknown_asset_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        "/api/v1/assets/ghost",
        serde_json::json!({"level": 2}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_owner(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("a", "Alpha")).await;

    let mut other = asset_payload("b", "Beta");
    other["owner_account"] = serde_json::json!("user#2");
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", other).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets?owner=user%232").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["uuid"], "b");
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_and_remove_resource(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("a", "Alpha")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/assets/a/resources",
        serde_json::json!({
            "resource_type": "sprite",
            "uri": "ipfs://sprite.png",
            "priority": 0,
            "context_tags": ["thumbnail"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let resource_id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = delete(
        app,
        &format!("/api/v1/assets/a/resources?resource_id={resource_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_unknown_resource_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("a", "Alpha")).await;

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/assets/a/resources?resource_id=9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RESOURCE_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Custom state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_state_overwrites_value(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("a", "Alpha")).await;

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/assets/a/state",
        serde_json::json!({"state_key": "mood", "state_value": "neutral"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/assets/a/state",
        serde_json::json!({"state_key": "mood", "state_value": "angry"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state_value"], "angry");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_unknown_state_key_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/assets", asset_payload("a", "Alpha")).await;

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/assets/a/state?state_key=ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STATE_KEY_NOT_FOUND");
}
