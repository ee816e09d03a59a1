//! Route definitions for the `/bookings` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /                          -> list_bookings
/// POST   /                          -> create_booking
/// GET    /{id}                      -> get_booking
/// POST   /{id}/confirm              -> confirm_booking
/// POST   /{id}/cancel               -> cancel_booking
/// POST   /{id}/start                -> start_booking
/// POST   /{id}/complete             -> complete_booking
/// POST   /{id}/payment_status       -> set_payment_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/confirm", post(bookings::confirm_booking))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .route("/{id}/start", post(bookings::start_booking))
        .route("/{id}/complete", post(bookings::complete_booking))
        .route("/{id}/payment_status", post(bookings::set_payment_status))
}
