//! Repository for the `messages` table.

use atelier_core::ledger::MessageBox;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::message::{CreateMessage, Message};

const COLUMNS: &str = "id, sender_id, recipient_id, booking_id, subject, body, is_read, created_at";

pub struct MessageRepo;

fn owner_column(mailbox: MessageBox) -> &'static str {
    match mailbox {
        MessageBox::Inbox => "recipient_id",
        MessageBox::Sent => "sender_id",
    }
}

impl MessageRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateMessage,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, recipient_id, booking_id, subject, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.sender_id)
            .bind(input.recipient_id)
            .bind(input.booking_id)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One side of a user's mailbox, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        mailbox: MessageBox,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE {} = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3",
            owner_column(mailbox)
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, user_id: DbId, mailbox: MessageBox) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM messages WHERE {} = $1",
            owner_column(mailbox)
        );
        sqlx::query_scalar(&query).bind(user_id).fetch_one(pool).await
    }

    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("UPDATE messages SET is_read = true WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
