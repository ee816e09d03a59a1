//! Booking lifecycle: statuses, payment statuses and who may move them.
//!
//! Status axis: `pending -> confirmed -> in_progress -> completed`, with
//! `cancelled` reachable by cancellation. The payment axis is independent and
//! only staff set it.
//!
//! Confirm and cancel do not look at the current status: re-confirming a
//! confirmed (or cancelled) booking succeeds again, and cancelling a
//! cancelled booking is accepted. Start and complete are strict.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::{validate_amount, Money};
use crate::roles::Actor;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| CoreError::Validation(format!("Invalid booking status '{name}'")))
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payment axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    PartiallyPaid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Paid,
        Self::PartiallyPaid,
        Self::Failed,
        Self::Refunded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| CoreError::Validation(format!("Invalid payment status '{name}'")))
    }

    /// Money actually reached the designer.
    pub fn is_received(self) -> bool {
        matches!(self, Self::Paid | Self::PartiallyPaid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// The two users a booking links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingParties {
    pub client_id: DbId,
    pub designer_id: DbId,
}

impl BookingParties {
    pub fn includes(&self, user_id: DbId) -> bool {
        self.client_id == user_id || self.designer_id == user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Confirm,
    Cancel,
    Start,
    Complete,
}

impl BookingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Start => "start",
            Self::Complete => "complete",
        }
    }
}

/// Check that `actor` may perform `action` on a booking between `parties`.
pub fn authorize(
    actor: &Actor,
    parties: &BookingParties,
    action: BookingAction,
) -> Result<(), CoreError> {
    if actor.has_staff_rights() {
        return Ok(());
    }
    match action {
        BookingAction::Confirm if actor.is(parties.designer_id) => Ok(()),
        BookingAction::Confirm => Err(CoreError::forbidden(
            "Only the assigned designer can confirm this booking.",
        )),
        BookingAction::Cancel if parties.includes(actor.id) => Ok(()),
        BookingAction::Cancel => Err(CoreError::forbidden("Not allowed to cancel this booking.")),
        BookingAction::Start | BookingAction::Complete if actor.is(parties.designer_id) => Ok(()),
        BookingAction::Start | BookingAction::Complete => Err(CoreError::Forbidden(format!(
            "Only the assigned designer can {} this booking.",
            action.as_str()
        ))),
    }
}

/// Status reached by applying `action` to a booking currently in `current`.
pub fn next_status(current: BookingStatus, action: BookingAction) -> Result<BookingStatus, CoreError> {
    match (action, current) {
        (BookingAction::Confirm, _) => Ok(BookingStatus::Confirmed),
        (BookingAction::Cancel, _) => Ok(BookingStatus::Cancelled),
        (BookingAction::Start, BookingStatus::Confirmed) => Ok(BookingStatus::InProgress),
        (BookingAction::Complete, BookingStatus::InProgress) => Ok(BookingStatus::Completed),
        (action, current) => Err(CoreError::Conflict(format!(
            "Cannot {} a booking that is {current}",
            action.as_str()
        ))),
    }
}

/// Only staff (standing in for the payment integration) move the payment axis.
pub fn authorize_payment_update(actor: &Actor) -> Result<(), CoreError> {
    if actor.has_staff_rights() {
        Ok(())
    } else {
        Err(CoreError::forbidden("Only staff can update payment status."))
    }
}

// ---------------------------------------------------------------------------
// Creation rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingAmounts {
    pub amount: Money,
    pub deposit: Money,
}

/// `amount` falls back to the design price, `deposit` to zero.
pub fn resolve_amounts(
    design_price: Money,
    amount: Option<Money>,
    deposit: Option<Money>,
) -> Result<BookingAmounts, CoreError> {
    let amount = validate_amount("amount", amount.unwrap_or(design_price))?;
    let deposit = validate_amount("deposit", deposit.unwrap_or(Money::ZERO))?;
    Ok(BookingAmounts { amount, deposit })
}

pub fn validate_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), CoreError> {
    match end {
        Some(end) if end < start => Err(CoreError::validation(
            "end_date must not be before start_date",
        )),
        _ => Ok(()),
    }
}

/// Inclusive day count; a booking without an end date lasts one day.
pub fn duration_days(start: NaiveDate, end: Option<NaiveDate>) -> i64 {
    match end {
        Some(end) => (end - start).num_days() + 1,
        None => 1,
    }
}
