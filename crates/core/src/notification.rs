//! Notification kinds and the messages emitted on state changes.
//!
//! Notifications are written in the same transaction as the change that
//! caused them; this module only decides *who* gets *what*.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::booking::PaymentStatus;
use crate::design::ModerationDecision;
use crate::error::CoreError;
use crate::types::DbId;

/// Title used in messages when the booked design no longer exists.
pub const REMOVED_DESIGN_TITLE: &str = "a removed design";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BookingRequest,
    BookingConfirmed,
    BookingCancelled,
    NewMessage,
    NewReview,
    DesignApproved,
    DesignRejected,
    PaymentReceived,
}

impl NotificationType {
    pub const ALL: [Self; 8] = [
        Self::BookingRequest,
        Self::BookingConfirmed,
        Self::BookingCancelled,
        Self::NewMessage,
        Self::NewReview,
        Self::DesignApproved,
        Self::DesignRejected,
        Self::PaymentReceived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BookingRequest => "booking_request",
            Self::BookingConfirmed => "booking_confirmed",
            Self::BookingCancelled => "booking_cancelled",
            Self::NewMessage => "new_message",
            Self::NewReview => "new_review",
            Self::DesignApproved => "design_approved",
            Self::DesignRejected => "design_rejected",
            Self::PaymentReceived => "payment_received",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown notification type '{name}'")))
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: DbId,
    pub kind: NotificationType,
    pub message: String,
    pub related_id: Option<DbId>,
}

fn title_or_placeholder(title: Option<&str>) -> &str {
    title.unwrap_or(REMOVED_DESIGN_TITLE)
}

impl NotificationDraft {
    /// Sent to the designer when a client books one of their designs.
    pub fn booking_request(
        designer_id: DbId,
        booking_id: DbId,
        design_title: Option<&str>,
        client_email: &str,
    ) -> Self {
        Self {
            user_id: designer_id,
            kind: NotificationType::BookingRequest,
            message: format!(
                "New booking request for '{}' from {client_email}",
                title_or_placeholder(design_title)
            ),
            related_id: Some(booking_id),
        }
    }

    /// Sent to the client every time the booking is confirmed.
    pub fn booking_confirmed(client_id: DbId, booking_id: DbId, design_title: Option<&str>) -> Self {
        Self {
            user_id: client_id,
            kind: NotificationType::BookingConfirmed,
            message: format!(
                "Your booking for '{}' was confirmed.",
                title_or_placeholder(design_title)
            ),
            related_id: Some(booking_id),
        }
    }

    /// Sent to the designer when money for a booking arrives. `None` for
    /// payment states that do not count as received.
    pub fn payment_received(
        designer_id: DbId,
        booking_id: DbId,
        status: PaymentStatus,
    ) -> Option<Self> {
        status.is_received().then(|| Self {
            user_id: designer_id,
            kind: NotificationType::PaymentReceived,
            message: format!("Payment received for booking #{booking_id} ({status})."),
            related_id: Some(booking_id),
        })
    }

    pub fn design_moderated(
        designer_id: DbId,
        design_id: DbId,
        design_title: &str,
        decision: ModerationDecision,
    ) -> Self {
        let (kind, message) = match decision {
            ModerationDecision::Approve => (
                NotificationType::DesignApproved,
                format!("Your design '{design_title}' was approved and is now public."),
            ),
            ModerationDecision::Reject => (
                NotificationType::DesignRejected,
                format!("Your design '{design_title}' was rejected."),
            ),
        };
        Self {
            user_id: designer_id,
            kind,
            message,
            related_id: Some(design_id),
        }
    }

    pub fn new_review(designer_id: DbId, review_id: DbId, rating: i16, reviewer_email: &str) -> Self {
        Self {
            user_id: designer_id,
            kind: NotificationType::NewReview,
            message: format!("{reviewer_email} left you a {rating}-star review."),
            related_id: Some(review_id),
        }
    }

    pub fn new_message(recipient_id: DbId, message_id: DbId, sender_email: &str) -> Self {
        Self {
            user_id: recipient_id,
            kind: NotificationType::NewMessage,
            message: format!("New message from {sender_email}"),
            related_id: Some(message_id),
        }
    }
}

/// Result of marking every unread notification as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAllOutcome {
    Marked(u64),
    /// Nothing was unread. Reported to the caller as a client error.
    NothingToMark,
}

impl MarkAllOutcome {
    pub fn from_count(count: u64) -> Self {
        if count == 0 {
            Self::NothingToMark
        } else {
            Self::Marked(count)
        }
    }
}

pub fn authorize_mark_read(caller_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if caller_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::forbidden(
            "You can only mark your own notifications as read.",
        ))
    }
}
