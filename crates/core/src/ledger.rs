//! Rules for the review and message ledgers.
//!
//! Favorites have no rules beyond design visibility and the unique
//! `(user, design)` pair, which the database enforces.

use crate::booking::BookingParties;
use crate::error::CoreError;
use crate::roles::{Actor, Role};
use crate::types::DbId;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Maximum review title / message subject length.
pub const MAX_SUBJECT_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// The reviewed user must be a designer, and not the reviewer.
pub fn validate_review_target(
    reviewer: &Actor,
    designer_id: DbId,
    designer_role: Role,
) -> Result<(), CoreError> {
    if designer_role != Role::Designer {
        return Err(CoreError::Validation(format!(
            "User {designer_id} is not a designer"
        )));
    }
    if reviewer.is(designer_id) {
        return Err(CoreError::validation("You cannot review yourself"));
    }
    Ok(())
}

/// A review tied to a booking must be written by that booking's client about
/// that booking's designer.
pub fn validate_booking_link(
    reviewer: &Actor,
    designer_id: DbId,
    booking: &BookingParties,
) -> Result<(), CoreError> {
    if !reviewer.is(booking.client_id) {
        return Err(CoreError::validation(
            "Only the client of a booking can review it",
        ));
    }
    if booking.designer_id != designer_id {
        return Err(CoreError::validation(
            "The booking belongs to a different designer",
        ));
    }
    Ok(())
}

pub fn authorize_review_approval(actor: &Actor) -> Result<(), CoreError> {
    if actor.has_staff_rights() {
        Ok(())
    } else {
        Err(CoreError::forbidden("Only staff can approve reviews."))
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub fn validate_recipient(sender: &Actor, recipient_id: DbId) -> Result<(), CoreError> {
    if sender.is(recipient_id) {
        Err(CoreError::validation("You cannot send a message to yourself"))
    } else {
        Ok(())
    }
}

/// A message scoped to a booking must go to the other party of it (staff may
/// write to either party).
pub fn validate_message_booking(
    recipient_id: DbId,
    booking: &BookingParties,
) -> Result<(), CoreError> {
    if booking.includes(recipient_id) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "The recipient is not a participant of this booking",
        ))
    }
}

pub fn validate_message_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        Err(CoreError::validation("body must not be empty"))
    } else {
        Ok(())
    }
}

/// Only the recipient marks a message read. Callers who are neither party
/// must be answered with `NotFound` before reaching this check.
pub fn authorize_message_read(
    caller: &Actor,
    message_id: DbId,
    sender_id: DbId,
    recipient_id: DbId,
) -> Result<(), CoreError> {
    if caller.is(recipient_id) {
        Ok(())
    } else if caller.is(sender_id) {
        Err(CoreError::forbidden(
            "Only the recipient can mark a message as read.",
        ))
    } else {
        Err(CoreError::not_found("Message", message_id))
    }
}

/// Which side of the mailbox to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBox {
    #[default]
    Inbox,
    Sent,
}

impl MessageBox {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "inbox" => Ok(Self::Inbox),
            "sent" => Ok(Self::Sent),
            other => Err(CoreError::Validation(format!(
                "Unknown box '{other}'. Must be one of: inbox, sent"
            ))),
        }
    }
}
