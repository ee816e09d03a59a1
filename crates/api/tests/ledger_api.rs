//! Integration tests for reviews, favorites and direct messages.

mod common;

use atelier_core::design::DesignStatus;
use atelier_core::roles::Role;
use axum::http::StatusCode;
use common::{
    body_json, create_design, create_user, delete_auth, get, get_auth, post_auth, post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn notifications_of(pool: &PgPool, user_id: i64, kind: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND notification_type = $2",
    )
    .bind(user_id)
    .bind(kind)
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_is_unapproved_and_notifies_designer(pool: PgPool) {
    let (_, client_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &client_token,
        json!({ "designer": designer.id, "rating": 5, "title": "Superb", "comment": "Loved it" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_approved"], false);
    assert_eq!(notifications_of(&pool, designer.id, "new_review").await, 1);

    // Not approved yet, so anonymous callers do not see it.
    let response = get(common::build_test_app(pool.clone()), "/api/v1/reviews").await;
    assert_eq!(body_json(response).await["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_review_conflicts(pool: PgPool) {
    let (_, client_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let body = json!({ "designer": designer.id, "rating": 4 });

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &client_token,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &client_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(notifications_of(&pool, designer.id, "new_review").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_rules(pool: PgPool) {
    let (_, client_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (other_client, _) = create_user(&pool, "o@example.com", Role::Client, false).await;
    let (designer, designer_token) =
        create_user(&pool, "d@example.com", Role::Designer, false).await;

    let cases = [
        (&client_token, json!({ "designer": designer.id, "rating": 6 }), StatusCode::BAD_REQUEST),
        (&client_token, json!({ "designer": other_client.id, "rating": 3 }), StatusCode::BAD_REQUEST),
        (&designer_token, json!({ "designer": designer.id, "rating": 3 }), StatusCode::BAD_REQUEST),
        (&client_token, json!({ "designer": 777_777, "rating": 3 }), StatusCode::NOT_FOUND),
    ];
    for (token, body, expected) in cases {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/reviews",
            token,
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), expected, "body: {body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_approves_review(pool: PgPool) {
    let (_, client_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, designer_token) =
        create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, staff_token) = create_user(&pool, "s@example.com", Role::Staff, true).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &client_token,
        json!({ "designer": designer.id, "rating": 4 }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/reviews/{id}/approve");

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &designer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &staff_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_approved"], true);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/reviews?designer={}", designer.id),
    )
    .await;
    assert_eq!(body_json(response).await["total"], 1);
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorite_twice_keeps_one_row(pool: PgPool) {
    let (user, token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Keeper", DesignStatus::Approved).await;
    let body = json!({ "design": design.id });

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/favorites",
        &token,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/favorites",
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/favorites", &token).await;
    assert_eq!(body_json(response).await["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_favorite(pool: PgPool) {
    let (_, token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Fleeting", DesignStatus::Approved).await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/favorites",
        &token,
        json!({ "design": design.id }),
    )
    .await;

    let uri = format!("/api/v1/favorites/{}", design.id);
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_favorite_hidden_design(pool: PgPool) {
    let (_, token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Secret", DesignStatus::Pending).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/favorites",
        &token,
        json!({ "design": design.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_message_notifies_recipient(pool: PgPool) {
    let (sender, sender_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (recipient, recipient_token) =
        create_user(&pool, "d@example.com", Role::Designer, false).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/messages",
        &sender_token,
        json!({ "recipient": recipient.id, "subject": "Hello", "body": "Are you free in May?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sender_id"], sender.id);
    assert_eq!(json["data"]["is_read"], false);
    assert_eq!(notifications_of(&pool, recipient.id, "new_message").await, 1);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/messages",
        &recipient_token,
    )
    .await;
    assert_eq!(body_json(response).await["total"], 1);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/messages?box=sent",
        &recipient_token,
    )
    .await;
    assert_eq!(body_json(response).await["total"], 0);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/messages?box=sent",
        &sender_token,
    )
    .await;
    assert_eq!(body_json(response).await["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_to_self_or_empty_is_rejected(pool: PgPool) {
    let (user, token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (other, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;

    for body in [
        json!({ "recipient": user.id, "body": "talking to myself" }),
        json!({ "recipient": other.id, "body": "   " }),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/messages",
            &token,
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_recipient_marks_message_read(pool: PgPool) {
    let (_, sender_token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let (recipient, recipient_token) =
        create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, stranger_token) = create_user(&pool, "x@example.com", Role::Client, false).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/messages",
        &sender_token,
        json!({ "recipient": recipient.id, "body": "ping" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/messages/{id}/mark_read");

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &sender_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &stranger_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &recipient_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_read"], true);
}
