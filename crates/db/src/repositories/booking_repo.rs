//! Repository for the `bookings` table.

use atelier_core::booking::{BookingStatus, PaymentStatus};
use atelier_core::policy::BookingScope;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::{BindValue, Filter};
use crate::models::booking::{Booking, BookingListFilter, CreateBooking};

const COLUMNS: &str = "id, client_id, designer_id, design_id, status, payment_status, \
                       amount, deposit, start_date, end_date, address, city, state, \
                       country, postal_code, notes, created_at, updated_at";

pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking. Both status axes start at their column defaults.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (client_id, designer_id, design_id, amount, deposit, start_date, end_date,
                 address, city, state, country, postal_code, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.client_id)
            .bind(input.designer_id)
            .bind(input.design_id)
            .bind(input.amount)
            .bind(input.deposit)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.postal_code)
            .bind(&input.notes)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load and lock a booking row until the transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    pub async fn set_payment_status(
        conn: &mut PgConnection,
        id: DbId,
        status: PaymentStatus,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET payment_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Newest first, within the filter's scope.
    pub async fn list(
        pool: &PgPool,
        params: &BookingListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let filter = build_booking_filter(params);
        let idx = filter.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM bookings {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${idx} OFFSET ${}",
            filter.where_clause(),
            idx + 1
        );
        filter
            .bind_as(sqlx::query_as::<_, Booking>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &BookingListFilter) -> Result<i64, sqlx::Error> {
        let filter = build_booking_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM bookings {}",
            filter.where_clause()
        );
        filter
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }
}

fn build_booking_filter(params: &BookingListFilter) -> Filter {
    let mut filter = Filter::new();

    if let BookingScope::ParticipantOf(user_id) = params.scope {
        filter.push(
            "(client_id = {} OR designer_id = {})",
            BindValue::BigInt(user_id),
        );
    }
    filter.eq_opt(
        "status",
        params.status.map(|s| BindValue::Text(s.as_str().to_string())),
    );
    filter.eq_opt(
        "payment_status",
        params
            .payment_status
            .map(|s| BindValue::Text(s.as_str().to_string())),
    );
    filter.eq_opt("designer_id", params.designer_id.map(BindValue::BigInt));
    filter.eq_opt("client_id", params.client_id.map(BindValue::BigInt));
    filter.eq_opt("design_id", params.design_id.map(BindValue::BigInt));

    filter
}
