//! Repository for the `notifications` table.

use atelier_core::notification::NotificationDraft;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::{BindValue, Filter};
use crate::models::notification::{Notification, NotificationListFilter};

const COLUMNS: &str = "id, user_id, notification_type, message, is_read, related_id, created_at";

pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert an unread notification on the caller's transaction.
    pub async fn create(
        conn: &mut PgConnection,
        draft: &NotificationDraft,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, notification_type, message, related_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(draft.user_id)
            .bind(draft.kind.as_str())
            .bind(&draft.message)
            .bind(draft.related_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &NotificationListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = build_notification_filter(user_id, params);
        let idx = filter.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM notifications {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            idx + 1
        );
        filter
            .bind_as(sqlx::query_as::<_, Notification>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &NotificationListFilter,
    ) -> Result<i64, sqlx::Error> {
        let filter = build_notification_filter(user_id, params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM notifications {}",
            filter.where_clause()
        );
        filter
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }

    /// Mark one notification read, returning the updated row.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark every unread notification of a user read, returning how many changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}

fn build_notification_filter(user_id: DbId, params: &NotificationListFilter) -> Filter {
    let mut filter = Filter::new();
    filter.push("user_id = {}", BindValue::BigInt(user_id));
    filter.eq_opt("is_read", params.is_read.map(BindValue::Bool));
    filter.eq_opt(
        "notification_type",
        params
            .kind
            .map(|k| BindValue::Text(k.as_str().to_string())),
    );
    filter
}
