//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                          -> list_notifications
/// POST   /mark_all_read             -> mark_all_read
/// GET    /unread_count              -> unread_count
/// GET    /{id}                      -> get_notification
/// POST   /{id}/mark_read            -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/mark_all_read", post(notifications::mark_all_read))
        .route("/unread_count", get(notifications::unread_count))
        .route("/{id}", get(notifications::get_notification))
        .route("/{id}/mark_read", post(notifications::mark_read))
}
