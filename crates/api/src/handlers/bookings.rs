//! Handlers for the `/bookings` resource.
//!
//! All endpoints require authentication. Bookings the caller is not a party
//! to answer 404 as if they did not exist.

use atelier_core::booking::{BookingAction, BookingStatus, PaymentStatus};
use atelier_core::money::{blank_as_none, Money};
use atelier_core::pagination::Page;
use atelier_core::policy::booking_list_scope;
use atelier_core::types::{Date, DbId};
use atelier_db::models::booking::{Booking, BookingListFilter};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::engine::booking::{self, NewBooking};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse, StatusResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`. Any `status` or `payment_status` sent
/// by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub design: DbId,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub amount: Option<Money>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub deposit: Option<Money>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    pub notes: Option<String>,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListParams {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub designer: Option<DbId>,
    pub client: Option<DbId>,
    pub design: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /bookings/{id}/payment_status`.
#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub payment_status: String,
}

/// A booking with its derived day count.
#[derive(Debug, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub duration_days: i64,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        let duration_days = booking.duration_days();
        Self {
            booking,
            duration_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings
///
/// Staff see all bookings; everyone else sees bookings they are client or
/// designer of. Newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<PageResponse<BookingView>>> {
    let page = Page::new(params.limit, params.offset);
    let filter = BookingListFilter {
        status: params
            .status
            .as_deref()
            .map(BookingStatus::from_name)
            .transpose()?,
        payment_status: params
            .payment_status
            .as_deref()
            .map(PaymentStatus::from_name)
            .transpose()?,
        designer_id: params.designer,
        client_id: params.client,
        design_id: params.design,
        ..BookingListFilter::new(booking_list_scope(&auth.actor))
    };

    let (items, total) = booking::list(&state.pool, &auth.actor, filter, page).await?;
    Ok(Json(PageResponse::new(items, total, page).map(BookingView::from)))
}

/// POST /api/v1/bookings
///
/// Book a visible design. The designer is copied from the design and notified.
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BookingView>>)> {
    let booking = booking::create(
        &state.pool,
        &auth.actor,
        &auth.user.email,
        NewBooking {
            design_id: input.design,
            amount: input.amount,
            deposit: input.deposit,
            start_date: input.start_date,
            end_date: input.end_date,
            address: input.address,
            city: input.city,
            state: input.state,
            country: input.country,
            postal_code: input.postal_code,
            notes: input.notes,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: booking.into(),
        }),
    ))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookingView>>> {
    let booking = booking::get(&state.pool, &auth.actor, id).await?;
    Ok(Json(DataResponse {
        data: booking.into(),
    }))
}

/// POST /api/v1/bookings/{id}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    booking::transition(&state.pool, &auth.actor, id, BookingAction::Confirm).await?;
    Ok(Json(StatusResponse {
        status: "booking confirmed",
    }))
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    booking::transition(&state.pool, &auth.actor, id, BookingAction::Cancel).await?;
    Ok(Json(StatusResponse {
        status: "booking cancelled",
    }))
}

/// POST /api/v1/bookings/{id}/start
pub async fn start_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookingView>>> {
    let booking = booking::transition(&state.pool, &auth.actor, id, BookingAction::Start).await?;
    Ok(Json(DataResponse {
        data: booking.into(),
    }))
}

/// POST /api/v1/bookings/{id}/complete
pub async fn complete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookingView>>> {
    let booking =
        booking::transition(&state.pool, &auth.actor, id, BookingAction::Complete).await?;
    Ok(Json(DataResponse {
        data: booking.into(),
    }))
}

/// POST /api/v1/bookings/{id}/payment_status
///
/// Staff only. `paid` and `partially_paid` notify the designer.
pub async fn set_payment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<PaymentStatusRequest>,
) -> AppResult<Json<DataResponse<BookingView>>> {
    let status = PaymentStatus::from_name(&input.payment_status)?;
    let booking = booking::set_payment_status(&state.pool, &auth.actor, id, status).await?;
    Ok(Json(DataResponse {
        data: booking.into(),
    }))
}
