//! Repository for the `tags` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

const COLUMNS: &str = "id, name, created_at";

pub struct TagRepo;

impl TagRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Which of `ids` exist.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM tags WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
