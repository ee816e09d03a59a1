use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTag {
    pub name: String,
}
