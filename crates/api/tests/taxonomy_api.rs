//! Integration tests for categories and tags.

mod common;

use atelier_core::roles::Role;
use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, patch_json_auth, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_staff_creates_categories(pool: PgPool) {
    let (_, designer_token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, staff_token) = create_user(&pool, "s@example.com", Role::Staff, true).await;
    let body = json!({ "name": "Kitchens", "description": "Cooking spaces" });

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &designer_token,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &staff_token,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_active"], true);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &staff_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_category_is_staff_only(pool: PgPool) {
    let (_, staff_token) = create_user(&pool, "s@example.com", Role::Staff, true).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &staff_token,
        json!({ "name": "Retired" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        &staff_token,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/categories").await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &staff_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tags_require_auth_and_unique_names(pool: PgPool) {
    let (_, token) = create_user(&pool, "c@example.com", Role::Client, false).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tags",
        json!({ "name": "scandi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tags",
        &token,
        json!({ "name": "scandi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tags",
        &token,
        json!({ "name": "scandi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(common::build_test_app(pool), "/api/v1/tags").await;
    assert_eq!(body_json(response).await["data"][0]["name"], "scandi");
}
