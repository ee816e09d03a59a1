//! Repository for the `reviews` table.

use atelier_core::policy::ReviewScope;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::{BindValue, Filter};
use crate::models::review::{CreateReview, Review, ReviewListFilter};

const COLUMNS: &str = "id, client_id, designer_id, booking_id, rating, title, comment, \
                       is_approved, created_at, updated_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert an unapproved review. Duplicates fail on
    /// `uq_reviews_client_designer_booking` / `uq_reviews_booking`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (client_id, designer_id, booking_id, rating, title, comment)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.client_id)
            .bind(input.designer_id)
            .bind(input.booking_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.comment)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &ReviewListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let filter = build_review_filter(params);
        let idx = filter.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM reviews {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            idx + 1
        );
        filter
            .bind_as(sqlx::query_as::<_, Review>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &ReviewListFilter) -> Result<i64, sqlx::Error> {
        let filter = build_review_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM reviews {}",
            filter.where_clause()
        );
        filter
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }

    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_approved = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

fn build_review_filter(params: &ReviewListFilter) -> Filter {
    let mut filter = Filter::new();

    match params.scope {
        ReviewScope::All => {}
        ReviewScope::ApprovedOrInvolving(user_id) => filter.push(
            "(is_approved OR client_id = {} OR designer_id = {})",
            BindValue::BigInt(user_id),
        ),
        ReviewScope::ApprovedOnly => filter.raw("is_approved"),
    }
    filter.eq_opt("designer_id", params.designer_id.map(BindValue::BigInt));

    filter
}
