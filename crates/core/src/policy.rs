//! Visibility and mutability predicates.
//!
//! Every read path asks these functions on every call; nothing caches the
//! answer, because a design's status and a user's staff flag change
//! independently of each other.

use crate::booking::BookingParties;
use crate::design::DesignStatus;
use crate::roles::{Actor, Requester, Role};
use crate::types::DbId;

/// The parts of a design that visibility depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignFacts {
    pub designer_id: DbId,
    pub status: DesignStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewFacts {
    pub client_id: DbId,
    pub designer_id: DbId,
    pub is_approved: bool,
}

pub fn can_see_design(requester: &Requester, design: &DesignFacts) -> bool {
    design.status == DesignStatus::Approved
        || requester.is_user(design.designer_id)
        || requester.is_staff()
}

pub fn can_see_category(requester: &Requester, is_active: bool) -> bool {
    is_active || requester.is_staff()
}

pub fn can_see_booking(requester: &Requester, booking: &BookingParties) -> bool {
    requester.is_staff()
        || requester.is_user(booking.client_id)
        || requester.is_user(booking.designer_id)
}

pub fn can_modify_design_images(requester: &Requester, design: &DesignFacts) -> bool {
    requester.is_user(design.designer_id) || requester.is_staff()
}

/// Editing and deleting a design follow the same rule as its images.
pub fn can_modify_design(actor: &Actor, design: &DesignFacts) -> bool {
    can_modify_design_images(&Requester::from(*actor), design)
}

pub fn can_moderate(actor: &Actor) -> bool {
    actor.has_staff_rights()
}

pub fn can_create_design(actor: &Actor) -> bool {
    actor.role == Role::Designer || actor.has_staff_rights()
}

pub fn can_see_review(requester: &Requester, review: &ReviewFacts) -> bool {
    review.is_approved
        || requester.is_user(review.client_id)
        || requester.is_user(review.designer_id)
        || requester.is_staff()
}

// ---------------------------------------------------------------------------
// Listing scopes
// ---------------------------------------------------------------------------

/// The `designer` query parameter on design listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignerFilter {
    /// The sentinel `me`.
    Me,
    Id(DbId),
}

impl DesignerFilter {
    /// Values that are neither `me` nor an integer are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("me") {
            Some(Self::Me)
        } else {
            raw.parse().ok().map(Self::Id)
        }
    }
}

/// Which statuses a requester may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVisibility {
    Any,
    /// `status = approved OR designer_id = <id>`.
    ApprovedOrOwnedBy(DbId),
    ApprovedOnly,
}

/// Row filter for a design listing. Both parts apply (logical AND).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignScope {
    pub visibility: StatusVisibility,
    pub designer_id: Option<DbId>,
}

/// Scope for listing designs; `None` means the result is empty without
/// querying (anonymous `designer=me`).
pub fn design_list_scope(
    requester: &Requester,
    filter: Option<DesignerFilter>,
) -> Option<DesignScope> {
    let visibility = match requester.actor() {
        Some(actor) if actor.has_staff_rights() => StatusVisibility::Any,
        Some(actor) => StatusVisibility::ApprovedOrOwnedBy(actor.id),
        None => StatusVisibility::ApprovedOnly,
    };
    let designer_id = match filter {
        None => None,
        Some(DesignerFilter::Id(id)) => Some(id),
        Some(DesignerFilter::Me) => Some(requester.user_id()?),
    };
    Some(DesignScope {
        visibility,
        designer_id,
    })
}

/// Row filter for booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    /// `client_id = <id> OR designer_id = <id>`.
    ParticipantOf(DbId),
}

pub fn booking_list_scope(actor: &Actor) -> BookingScope {
    if actor.has_staff_rights() {
        BookingScope::All
    } else {
        BookingScope::ParticipantOf(actor.id)
    }
}

/// Row filter for review listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewScope {
    All,
    /// Approved reviews plus those written by or about the user.
    ApprovedOrInvolving(DbId),
    ApprovedOnly,
}

pub fn review_list_scope(requester: &Requester) -> ReviewScope {
    match requester.actor() {
        Some(actor) if actor.has_staff_rights() => ReviewScope::All,
        Some(actor) => ReviewScope::ApprovedOrInvolving(actor.id),
        None => ReviewScope::ApprovedOnly,
    }
}
