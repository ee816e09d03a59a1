//! Repository for the `favorites` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::Favorite;

const COLUMNS: &str = "id, user_id, design_id, created_at";

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Add a favorite if absent. Returns the row and whether it was created.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        design_id: DbId,
    ) -> Result<(Favorite, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO favorites (user_id, design_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_user_design DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Favorite>(&insert)
            .bind(user_id)
            .bind(design_id)
            .fetch_optional(pool)
            .await?;
        if let Some(favorite) = created {
            return Ok((favorite, true));
        }

        let select = format!("SELECT {COLUMNS} FROM favorites WHERE user_id = $1 AND design_id = $2");
        let existing = sqlx::query_as::<_, Favorite>(&select)
            .bind(user_id)
            .bind(design_id)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    /// Returns `true` if a favorite was removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, design_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND design_id = $2")
            .bind(user_id)
            .bind(design_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
