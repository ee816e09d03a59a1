//! Notification fan-out and the per-user notification inbox.

use atelier_core::notification::{authorize_mark_read, MarkAllOutcome, NotificationDraft};
use atelier_core::pagination::Page;
use atelier_core::roles::Actor;
use atelier_core::types::DbId;
use atelier_db::models::notification::{Notification, NotificationListFilter};
use atelier_db::repositories::NotificationRepo;
use sqlx::{PgConnection, PgPool};

use super::not_found;
use crate::error::AppResult;

/// Persist `draft` on the caller's transaction.
///
/// An error here must abort the caller's unit of work.
pub async fn emit(conn: &mut PgConnection, draft: &NotificationDraft) -> AppResult<Notification> {
    let notification = NotificationRepo::create(conn, draft).await?;
    tracing::debug!(
        notification_id = notification.id,
        user_id = draft.user_id,
        kind = %draft.kind,
        related_id = ?draft.related_id,
        "Notification emitted"
    );
    Ok(notification)
}

pub async fn list(
    pool: &PgPool,
    actor: &Actor,
    filter: &NotificationListFilter,
    page: Page,
) -> AppResult<(Vec<Notification>, i64)> {
    let items =
        NotificationRepo::list_for_user(pool, actor.id, filter, page.limit, page.offset).await?;
    let total = NotificationRepo::count_for_user(pool, actor.id, filter).await?;
    Ok((items, total))
}

/// Another user's notification is reported as missing.
pub async fn get(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<Notification> {
    NotificationRepo::find_by_id(pool, id)
        .await?
        .filter(|n| actor.is(n.user_id))
        .ok_or_else(|| not_found("Notification", id))
}

/// Unknown ids are `NotFound`; someone else's notification is `Forbidden`.
pub async fn mark_read(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<Notification> {
    let notification = NotificationRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found("Notification", id))?;
    authorize_mark_read(actor.id, notification.user_id)?;

    NotificationRepo::mark_read(pool, id)
        .await?
        .ok_or_else(|| not_found("Notification", id))
}

pub async fn mark_all_read(pool: &PgPool, actor: &Actor) -> AppResult<MarkAllOutcome> {
    let count = NotificationRepo::mark_all_read(pool, actor.id).await?;
    tracing::debug!(user_id = actor.id, count, "Marked notifications as read");
    Ok(MarkAllOutcome::from_count(count))
}

pub async fn unread_count(pool: &PgPool, actor: &Actor) -> AppResult<i64> {
    Ok(NotificationRepo::unread_count(pool, actor.id).await?)
}
