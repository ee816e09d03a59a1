//! Integration tests for the design catalog: creation, visibility,
//! moderation, likes and image uploads.

mod common;

use atelier_core::design::DesignStatus;
use atelier_core::roles::Role;
use axum::http::StatusCode;
use common::{
    body_json, create_design, create_user, get, get_auth, patch_json_auth, post_anon, post_auth,
    post_json_auth, post_multipart_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_design_always_pending(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/designs",
        &token,
        json!({
            "title": "  Coastal bedroom  ",
            "description": "Linen and driftwood",
            "price": "250.00",
            "status": "approved",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["designer_id"], designer.id);
    assert_eq!(json["data"]["title"], "Coastal bedroom");
    assert_eq!(json["data"]["tags"], json!([]));
    assert_eq!(json["data"]["images"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_cannot_create_design(pool: PgPool) {
    let (_, token) = create_user(&pool, "c@example.com", Role::Client, false).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/designs",
        &token,
        json!({ "title": "Attempt", "price": "10" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_design_with_unknown_tag_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/designs",
        &token,
        json!({ "title": "Tagged", "price": "10", "tags": [424242] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_design_rejects_unstorable_or_missing_values(pool: PgPool) {
    let (_, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;

    for body in [
        json!({ "title": "Mansion", "price": "123456789" }),
        json!({ "title": "Studio", "price": "99.999" }),
        json!({ "title": "Studio", "price": "99", "width": "2.755" }),
        json!({ "title": "No price" }),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/designs",
            &token,
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let designs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM designs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(designs, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_sets_keeps_and_clears_nullable_fields(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Attic", DesignStatus::Pending).await;
    let category_id: i64 =
        sqlx::query_scalar("INSERT INTO categories (name) VALUES ('Attics') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let uri = format!("/api/v1/designs/{}", design.id);

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "category": category_id, "width": "4.50", "height": "2.40" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["category_id"], category_id);
    assert_eq!(json["data"]["width"], "4.50");

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "title": "Bright attic" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Bright attic");
    assert_eq!(json["data"]["category_id"], category_id);
    assert_eq!(json["data"]["width"], "4.50");

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "category": null, "width": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["category_id"].is_null());
    assert!(json["data"]["width"].is_null());
    assert_eq!(json["data"]["height"], "2.40");
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_list_shows_only_approved(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    create_design(&pool, designer.id, "Public", DesignStatus::Approved).await;
    create_design(&pool, designer.id, "Waiting", DesignStatus::Pending).await;
    create_design(&pool, designer.id, "Declined", DesignStatus::Rejected).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/designs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Public");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/designs?designer=me",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["total"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_designer_me_is_empty(pool: PgPool) {
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    create_design(&pool, designer.id, "Public", DesignStatus::Approved).await;

    let response = get(common::build_test_app(pool), "/api/v1/designs?designer=me").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_user_cannot_see_pending_design(pool: PgPool) {
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, other_token) = create_user(&pool, "o@example.com", Role::Client, false).await;
    let design = create_design(&pool, designer.id, "Hidden", DesignStatus::Pending).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/designs/{}", design.id),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_counts_views(pool: PgPool) {
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Popular", DesignStatus::Approved).await;
    let uri = format!("/api/v1/designs/{}", design.id);

    get(common::build_test_app(pool.clone()), &uri).await;
    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["views"], 2);
}

// ---------------------------------------------------------------------------
// Moderation and likes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_approval_notifies_designer(pool: PgPool) {
    let (designer, designer_token) =
        create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, staff_token) = create_user(&pool, "s@example.com", Role::Staff, true).await;
    let design = create_design(&pool, designer.id, "Review me", DesignStatus::Pending).await;
    let uri = format!("/api/v1/designs/{}/approve", design.id);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &designer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &staff_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "approved");

    let kinds: Vec<String> =
        sqlx::query_scalar("SELECT notification_type FROM notifications WHERE user_id = $1")
            .bind(designer.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(kinds, vec!["design_approved".to_string()]);

    let response = post_auth(common::build_test_app(pool.clone()), &uri, &staff_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_counts_every_call(pool: PgPool) {
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Likeable", DesignStatus::Approved).await;
    let uri = format!("/api/v1/designs/{}/like", design.id);

    post_anon(common::build_test_app(pool.clone()), &uri).await;
    let response = post_anon(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "design liked");
    assert_eq!(json["likes"], 2);
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_requires_files(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Bare", DesignStatus::Pending).await;

    let response = post_multipart_auth(
        common::build_test_app(pool),
        &format!("/api/v1/designs/{}/upload_images", design.id),
        &token,
        &[("caption", None, "nothing attached")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_by_non_owner_is_forbidden(pool: PgPool) {
    let (designer, _) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let (_, other_token) = create_user(&pool, "rival@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Mine", DesignStatus::Approved).await;

    let response = post_multipart_auth(
        common::build_test_app(pool),
        &format!("/api/v1/designs/{}/upload_images", design.id),
        &other_token,
        &[("images", Some("a.png"), "PNG")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_marks_only_first_image_primary(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Gallery", DesignStatus::Approved).await;

    let response = post_multipart_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/designs/{}/upload_images", design.id),
        &token,
        &[
            ("images", Some("front.jpg"), "first"),
            ("images[]", Some("back.PNG"), "second"),
            ("is_primary", None, "true"),
            ("caption", None, "Living room"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let images = json["data"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["is_primary"], true);
    assert_eq!(images[1]["is_primary"], false);
    assert_eq!(images[0]["caption"], "Living room");
    assert!(images[0]["image_url"].as_str().unwrap().starts_with("/media/"));

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/designs/{}/images", design.id),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_image_insert_removes_stored_files(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Gallery", DesignStatus::Approved).await;
    sqlx::query(
        "ALTER TABLE design_images ADD CONSTRAINT ck_block_captions \
         CHECK (caption IS DISTINCT FROM 'blocked')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let media = tempfile::tempdir().unwrap();

    let response = post_multipart_auth(
        common::build_test_app_with_media(pool.clone(), media.path().to_path_buf()),
        &format!("/api/v1/designs/{}/upload_images", design.id),
        &token,
        &[
            ("images", Some("front.jpg"), "first"),
            ("images", Some("back.jpg"), "second"),
            ("caption", None, "blocked"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(common::files_under(media.path()), Vec::<std::path::PathBuf>::new());
    let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM design_images")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(images, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_unsupported_format(pool: PgPool) {
    let (designer, token) = create_user(&pool, "d@example.com", Role::Designer, false).await;
    let design = create_design(&pool, designer.id, "Docs", DesignStatus::Approved).await;

    let response = post_multipart_auth(
        common::build_test_app(pool),
        &format!("/api/v1/designs/{}/upload_images", design.id),
        &token,
        &[("images", Some("plan.pdf"), "%PDF")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
