//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register                  -> register
/// POST   /token                     -> obtain_token
/// POST   /token/refresh             -> refresh
/// POST   /logout                    -> logout
/// GET    /profile                   -> get_profile
/// PATCH  /profile                   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/token", post(auth::obtain_token))
        .route("/token/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route(
            "/profile",
            get(auth::get_profile).patch(auth::update_profile),
        )
}
