#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use atelier_api::auth::jwt::{generate_access_token, JwtConfig};
use atelier_api::auth::password::hash_password;
use atelier_api::config::{MediaConfig, ServerConfig};
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_core::blob::LocalBlobStore;
use atelier_core::design::DesignStatus;
use atelier_core::money::Money;
use atelier_core::roles::Role;
use atelier_db::models::design::{CreateDesign, Design};
use atelier_db::models::user::{CreateUser, User};
use atelier_db::repositories::{DesignRepo, UserRepo};
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults and a throwaway media root.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        media: MediaConfig {
            root: std::env::temp_dir().join("atelier-test-media"),
            base_url: "/media".to_string(),
            max_upload_bytes: 1024 * 1024,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, test_config().media.root)
}

/// Same as [`build_test_app`], storing uploads under `media_root`.
pub fn build_test_app_with_media(pool: PgPool, media_root: PathBuf) -> Router {
    let mut config = test_config();
    config.media.root = media_root;
    let blobs = LocalBlobStore::new(config.media.root.clone(), config.media.base_url.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs: Arc::new(blobs),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user and mint an access token for it.
pub async fn create_user(pool: &PgPool, email: &str, role: Role, is_staff: bool) -> (User, String) {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        user_type: role.as_str().to_string(),
        is_staff,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    let token = generate_access_token(user.id, role.as_str(), &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Insert a design directly with the given status.
pub async fn create_design(
    pool: &PgPool,
    designer_id: i64,
    title: &str,
    status: DesignStatus,
) -> Design {
    let input = CreateDesign {
        title: title.to_string(),
        description: String::new(),
        designer_id,
        category_id: None,
        price: Money::from(1500),
        status,
        is_premium: false,
        width: None,
        height: None,
    };
    let mut conn = pool.acquire().await.expect("connection should be available");
    DesignRepo::create(&mut conn, &input)
        .await
        .expect("design creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    request(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_anon(app: Router, uri: &str) -> Response {
    send(app, request(Method::POST, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// A multipart part: `(field name, optional file name, content)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

pub async fn post_multipart_auth(app: Router, uri: &str, token: &str, parts: &[Part<'_>]) -> Response {
    const BOUNDARY: &str = "atelier-test-boundary";
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = request(Method::POST, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Every regular file below `dir`, recursively. A missing directory is empty.
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(files_under(&path));
        } else {
            files.push(path);
        }
    }
    files
}
