//! Repository for the `designs` and `design_tags` tables.

use atelier_core::design::{DesignStatus, STATUS_APPROVED};
use atelier_core::policy::StatusVisibility;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::{BindValue, Filter};
use crate::models::design::{CreateDesign, Design, DesignListFilter, UpdateDesign};

const COLUMNS: &str = "id, title, description, designer_id, category_id, price, status, \
                       is_premium, views, likes, width, height, created_at, updated_at";

pub struct DesignRepo;

impl DesignRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateDesign,
    ) -> Result<Design, sqlx::Error> {
        let query = format!(
            "INSERT INTO designs
                (title, description, designer_id, category_id, price, status, is_premium, width, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.designer_id)
            .bind(input.category_id)
            .bind(input.price)
            .bind(input.status.as_str())
            .bind(input.is_premium)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(conn)
            .await
    }

    /// Link a design to tags. Already-linked pairs are skipped.
    pub async fn attach_tags(
        conn: &mut PgConnection,
        design_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO design_tags (design_id, tag_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(design_id)
        .bind(tag_ids)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn tag_ids(pool: &PgPool, design_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT tag_id FROM design_tags WHERE design_id = $1 ORDER BY tag_id")
            .bind(design_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designs WHERE id = $1");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Title only, read on the caller's transaction.
    pub async fn title(conn: &mut PgConnection, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT title FROM designs WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Load and lock a design row for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Newest first, within the filter's visibility scope.
    pub async fn list(
        pool: &PgPool,
        params: &DesignListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Design>, sqlx::Error> {
        let filter = build_design_filter(params);
        let idx = filter.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM designs {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            idx + 1
        );
        filter
            .bind_as(sqlx::query_as::<_, Design>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &DesignListFilter) -> Result<i64, sqlx::Error> {
        let filter = build_design_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM designs {}",
            filter.where_clause()
        );
        filter
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }

    /// Apply a patch. Owner and status cannot change here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDesign,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!(
            "UPDATE designs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category_id = CASE WHEN $4 THEN $5 ELSE category_id END,
                price = COALESCE($6, price),
                is_premium = COALESCE($7, is_premium),
                width = CASE WHEN $8 THEN $9 ELSE width END,
                height = CASE WHEN $10 THEN $11 ELSE height END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.price)
            .bind(input.is_premium)
            .bind(input.width.is_some())
            .bind(input.width.flatten())
            .bind(input.height.is_some())
            .bind(input.height.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a design. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM designs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: DesignStatus,
    ) -> Result<Design, sqlx::Error> {
        let query = format!("UPDATE designs SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Atomically bump the view counter and return the updated row.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<Design>, sqlx::Error> {
        let query = format!(
            "UPDATE designs SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically bump the like counter, returning the new count.
    pub async fn increment_likes(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("UPDATE designs SET likes = likes + 1 WHERE id = $1 RETURNING likes")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

fn build_design_filter(params: &DesignListFilter) -> Filter {
    let mut filter = Filter::new();

    match params.scope.visibility {
        StatusVisibility::Any => {}
        StatusVisibility::ApprovedOrOwnedBy(owner) => filter.push(
            &format!("(status = '{STATUS_APPROVED}' OR designer_id = {{}})"),
            BindValue::BigInt(owner),
        ),
        StatusVisibility::ApprovedOnly => filter.raw(format!("status = '{STATUS_APPROVED}'")),
    }

    filter.eq_opt("designer_id", params.scope.designer_id.map(BindValue::BigInt));
    filter.eq_opt("category_id", params.category_id.map(BindValue::BigInt));
    filter.eq_opt(
        "status",
        params.status.map(|s| BindValue::Text(s.as_str().to_string())),
    );
    filter.eq_opt("is_premium", params.is_premium.map(BindValue::Bool));

    if let Some(ref search) = params.search {
        filter.push(
            "(title ILIKE {} OR description ILIKE {})",
            BindValue::Text(format!("%{search}%")),
        );
    }
    if let Some(tag_id) = params.tag_id {
        filter.push(
            "id IN (SELECT design_id FROM design_tags WHERE tag_id = {})",
            BindValue::BigInt(tag_id),
        );
    }

    filter
}
