//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! the caller's own notifications.

use atelier_core::notification::{MarkAllOutcome, NotificationType};
use atelier_core::pagination::Page;
use atelier_core::types::DbId;
use atelier_db::models::notification::{Notification, NotificationListFilter};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::engine::notifications;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse, StatusResponse};
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub is_read: Option<bool>,
    /// One of the notification type names, e.g. `booking_request`.
    pub notification_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<PageResponse<Notification>>> {
    let filter = NotificationListFilter {
        is_read: params.is_read,
        kind: params
            .notification_type
            .as_deref()
            .map(NotificationType::from_name)
            .transpose()?,
    };
    let page = Page::new(params.limit, params.offset);
    let (items, total) = notifications::list(&state.pool, &auth.actor, &filter, page).await?;
    Ok(Json(PageResponse::new(items, total, page)))
}

/// GET /api/v1/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notification = notifications::get(&state.pool, &auth.actor, id).await?;
    Ok(Json(DataResponse { data: notification }))
}

/// POST /api/v1/notifications/{id}/mark_read
///
/// 403 for someone else's notification, 404 for an unknown id.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    notifications::mark_read(&state.pool, &auth.actor, id).await?;
    Ok(Json(StatusResponse {
        status: "notification marked as read",
    }))
}

/// POST /api/v1/notifications/mark_all_read
///
/// 400 when nothing was unread.
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let outcome = notifications::mark_all_read(&state.pool, &auth.actor).await?;
    Ok(match outcome {
        MarkAllOutcome::Marked(count) => (
            StatusCode::OK,
            Json(json!({
                "status": format!("marked {count} notification(s) as read"),
                "count": count,
            })),
        ),
        MarkAllOutcome::NothingToMark => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "no unread notifications found" })),
        ),
    })
}

/// GET /api/v1/notifications/unread_count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = notifications::unread_count(&state.pool, &auth.actor).await?;
    Ok(Json(json!({ "data": { "count": count } })))
}
