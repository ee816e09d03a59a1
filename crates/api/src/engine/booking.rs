//! Booking lifecycle: creation, status transitions and payment updates.
//!
//! Confirm and cancel accept any current status. Re-confirming a confirmed
//! booking writes the status again and notifies the client again; cancelling
//! notifies nobody.

use atelier_core::booking::{
    authorize, authorize_payment_update, next_status, resolve_amounts, validate_dates,
    BookingAction, PaymentStatus,
};
use atelier_core::money::Money;
use atelier_core::notification::NotificationDraft;
use atelier_core::pagination::Page;
use atelier_core::policy::{booking_list_scope, can_see_booking, can_see_design};
use atelier_core::roles::{Actor, Requester};
use atelier_core::types::{Date, DbId};
use atelier_db::models::booking::{Booking, BookingListFilter, CreateBooking};
use atelier_db::repositories::{BookingRepo, DesignRepo};
use sqlx::PgPool;

use super::{not_found, notifications};
use crate::error::AppResult;

/// Client-supplied part of a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub design_id: DbId,
    /// Falls back to the design price.
    pub amount: Option<Money>,
    /// Falls back to zero.
    pub deposit: Option<Money>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub notes: Option<String>,
}

/// Create a pending booking for `client` and notify the design's designer.
///
/// The designer is always taken from the design, never from the caller.
pub async fn create(
    pool: &PgPool,
    client: &Actor,
    client_email: &str,
    input: NewBooking,
) -> AppResult<Booking> {
    let design = DesignRepo::find_by_id(pool, input.design_id)
        .await?
        .ok_or_else(|| not_found("Design", input.design_id))?;
    if !can_see_design(&Requester::from(*client), &design.facts()?) {
        return Err(not_found("Design", input.design_id));
    }

    validate_dates(input.start_date, input.end_date)?;
    let amounts = resolve_amounts(design.price, input.amount, input.deposit)?;

    let create = CreateBooking {
        client_id: client.id,
        designer_id: design.designer_id,
        design_id: design.id,
        amount: amounts.amount,
        deposit: amounts.deposit,
        start_date: input.start_date,
        end_date: input.end_date,
        address: input.address,
        city: input.city,
        state: input.state,
        country: input.country,
        postal_code: input.postal_code,
        notes: input.notes,
    };

    let mut tx = pool.begin().await?;
    let booking = BookingRepo::create(&mut *tx, &create).await?;
    let draft = NotificationDraft::booking_request(
        booking.designer_id,
        booking.id,
        Some(&design.title),
        client_email,
    );
    notifications::emit(&mut *tx, &draft).await?;
    tx.commit().await?;

    tracing::info!(
        booking_id = booking.id,
        client_id = booking.client_id,
        designer_id = booking.designer_id,
        design_id = design.id,
        "Booking created"
    );
    Ok(booking)
}

/// Bookings the actor is not a party to are reported as missing.
pub async fn get(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(pool, id)
        .await?
        .filter(|b| can_see_booking(&Requester::from(*actor), &b.parties()))
        .ok_or_else(|| not_found("Booking", id))
}

/// Apply a status action under a row lock on the booking.
pub async fn transition(
    pool: &PgPool,
    actor: &Actor,
    id: DbId,
    action: BookingAction,
) -> AppResult<Booking> {
    let mut tx = pool.begin().await?;

    let booking = BookingRepo::find_for_update(&mut *tx, id)
        .await?
        .filter(|b| can_see_booking(&Requester::from(*actor), &b.parties()))
        .ok_or_else(|| not_found("Booking", id))?;
    authorize(actor, &booking.parties(), action)?;
    let target = next_status(booking.status()?, action)?;

    let updated = BookingRepo::set_status(&mut *tx, id, target).await?;

    if action == BookingAction::Confirm {
        let title = match updated.design_id {
            Some(design_id) => DesignRepo::title(&mut *tx, design_id).await?,
            None => None,
        };
        let draft =
            NotificationDraft::booking_confirmed(updated.client_id, updated.id, title.as_deref());
        notifications::emit(&mut *tx, &draft).await?;
    }
    tx.commit().await?;

    tracing::info!(
        booking_id = id,
        actor_id = actor.id,
        action = action.as_str(),
        from = %booking.status,
        to = %target,
        "Booking status changed"
    );
    Ok(updated)
}

/// Staff-only update of the payment axis. Money counted as received notifies
/// the designer.
pub async fn set_payment_status(
    pool: &PgPool,
    actor: &Actor,
    id: DbId,
    status: PaymentStatus,
) -> AppResult<Booking> {
    authorize_payment_update(actor)?;

    let mut tx = pool.begin().await?;
    let previous = BookingRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found("Booking", id))?
        .payment_status()?;
    let updated = BookingRepo::set_payment_status(&mut *tx, id, status).await?;

    if let Some(draft) = NotificationDraft::payment_received(updated.designer_id, id, status) {
        notifications::emit(&mut *tx, &draft).await?;
    }
    tx.commit().await?;

    tracing::info!(
        booking_id = id,
        actor_id = actor.id,
        from = %previous,
        to = %status,
        "Payment status updated"
    );
    Ok(updated)
}

/// List bookings visible to `actor`, newest first. `filter.scope` is
/// replaced by the actor's scope.
pub async fn list(
    pool: &PgPool,
    actor: &Actor,
    mut filter: BookingListFilter,
    page: Page,
) -> AppResult<(Vec<Booking>, i64)> {
    filter.scope = booking_list_scope(actor);
    let items = BookingRepo::list(pool, &filter, page.limit, page.offset).await?;
    let total = BookingRepo::count(pool, &filter).await?;
    Ok((items, total))
}
