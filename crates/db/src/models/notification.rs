//! Notification model.

use atelier_core::notification::NotificationType;
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// `related_id` is not a foreign key and may dangle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub message: String,
    pub is_read: bool,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Filters for a user's notification list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationListFilter {
    pub is_read: Option<bool>,
    pub kind: Option<NotificationType>,
}
