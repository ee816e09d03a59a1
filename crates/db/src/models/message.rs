//! Direct message model.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub booking_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateMessage {
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub booking_id: Option<DbId>,
    pub subject: String,
    pub body: String,
}
