//! Repository for the `design_images` table.

use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::design::{CreateDesignImage, DesignImage};

const COLUMNS: &str = "id, design_id, image_url, is_primary, caption, sort_order, created_at";

pub struct DesignImageRepo;

impl DesignImageRepo {
    /// Append an image after the design's existing ones.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateDesignImage,
    ) -> Result<DesignImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO design_images (design_id, image_url, is_primary, caption, sort_order)
             VALUES ($1, $2, $3, $4,
                     (SELECT COALESCE(MAX(sort_order), -1) + 1
                      FROM design_images WHERE design_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignImage>(&query)
            .bind(input.design_id)
            .bind(&input.image_url)
            .bind(input.is_primary)
            .bind(&input.caption)
            .fetch_one(conn)
            .await
    }

    /// Clear the primary flag on every image of a design.
    pub async fn clear_primary(conn: &mut PgConnection, design_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE design_images SET is_primary = false WHERE design_id = $1 AND is_primary")
            .bind(design_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn list_for_design(
        pool: &PgPool,
        design_id: DbId,
    ) -> Result<Vec<DesignImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design_images
             WHERE design_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, DesignImage>(&query)
            .bind(design_id)
            .fetch_all(pool)
            .await
    }
}
