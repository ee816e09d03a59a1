//! Reviews, favorites and direct messages.

use atelier_core::error::CoreError;
use atelier_core::ledger::{
    authorize_message_read, authorize_review_approval, validate_booking_link,
    validate_message_body, validate_message_booking, validate_rating, validate_recipient,
    validate_review_target, MessageBox, MAX_SUBJECT_LEN,
};
use atelier_core::notification::NotificationDraft;
use atelier_core::pagination::Page;
use atelier_core::policy::{can_see_booking, can_see_design, review_list_scope};
use atelier_core::roles::{Actor, Requester};
use atelier_core::types::DbId;
use atelier_db::models::booking::Booking;
use atelier_db::models::favorite::Favorite;
use atelier_db::models::message::{CreateMessage, Message};
use atelier_db::models::review::{CreateReview, Review, ReviewListFilter};
use atelier_db::repositories::{
    BookingRepo, DesignRepo, FavoriteRepo, MessageRepo, ReviewRepo, UserRepo,
};
use sqlx::PgPool;

use super::{not_found, notifications};
use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewReview {
    pub designer_id: DbId,
    pub booking_id: Option<DbId>,
    pub rating: i16,
    pub title: String,
    pub comment: String,
}

/// Write an unapproved review and notify the reviewed designer.
///
/// A second review for the same client, designer and booking (or the same
/// pair without a booking) fails with a conflict.
pub async fn create_review(
    pool: &PgPool,
    reviewer: &Actor,
    reviewer_email: &str,
    input: NewReview,
) -> AppResult<Review> {
    validate_rating(input.rating)?;
    validate_subject("title", &input.title)?;

    let designer = UserRepo::find_by_id(pool, input.designer_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| not_found("User", input.designer_id))?;
    validate_review_target(reviewer, designer.id, designer.role()?)?;

    if let Some(booking_id) = input.booking_id {
        let booking = booking_visible_to(pool, reviewer, booking_id).await?;
        validate_booking_link(reviewer, designer.id, &booking.parties())?;
    }

    let create = CreateReview {
        client_id: reviewer.id,
        designer_id: designer.id,
        booking_id: input.booking_id,
        rating: input.rating,
        title: input.title.trim().to_string(),
        comment: input.comment,
    };

    let mut tx = pool.begin().await?;
    let review = ReviewRepo::create(&mut *tx, &create).await?;
    let draft =
        NotificationDraft::new_review(review.designer_id, review.id, review.rating, reviewer_email);
    notifications::emit(&mut *tx, &draft).await?;
    tx.commit().await?;

    tracing::info!(
        review_id = review.id,
        client_id = reviewer.id,
        designer_id = review.designer_id,
        rating = review.rating,
        "Review created"
    );
    Ok(review)
}

pub async fn list_reviews(
    pool: &PgPool,
    requester: &Requester,
    designer_id: Option<DbId>,
    page: Page,
) -> AppResult<(Vec<Review>, i64)> {
    let filter = ReviewListFilter {
        scope: review_list_scope(requester),
        designer_id,
    };
    let items = ReviewRepo::list(pool, &filter, page.limit, page.offset).await?;
    let total = ReviewRepo::count(pool, &filter).await?;
    Ok((items, total))
}

pub async fn approve_review(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<Review> {
    authorize_review_approval(actor)?;
    let review = ReviewRepo::approve(pool, id)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    tracing::info!(review_id = id, actor_id = actor.id, "Review approved");
    Ok(review)
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Idempotent; the flag tells whether a new row was written.
pub async fn add_favorite(
    pool: &PgPool,
    actor: &Actor,
    design_id: DbId,
) -> AppResult<(Favorite, bool)> {
    let design = DesignRepo::find_by_id(pool, design_id)
        .await?
        .ok_or_else(|| not_found("Design", design_id))?;
    if !can_see_design(&Requester::from(*actor), &design.facts()?) {
        return Err(not_found("Design", design_id));
    }
    Ok(FavoriteRepo::add(pool, actor.id, design_id).await?)
}

pub async fn remove_favorite(pool: &PgPool, actor: &Actor, design_id: DbId) -> AppResult<()> {
    if FavoriteRepo::remove(pool, actor.id, design_id).await? {
        Ok(())
    } else {
        Err(not_found("Favorite", design_id))
    }
}

pub async fn list_favorites(
    pool: &PgPool,
    actor: &Actor,
    page: Page,
) -> AppResult<(Vec<Favorite>, i64)> {
    let items = FavoriteRepo::list_for_user(pool, actor.id, page.limit, page.offset).await?;
    let total = FavoriteRepo::count_for_user(pool, actor.id).await?;
    Ok((items, total))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub recipient_id: DbId,
    pub booking_id: Option<DbId>,
    pub subject: String,
    pub body: String,
}

/// Send a message and notify the recipient in the same transaction.
pub async fn send_message(
    pool: &PgPool,
    sender: &Actor,
    sender_email: &str,
    input: NewMessage,
) -> AppResult<Message> {
    validate_recipient(sender, input.recipient_id)?;
    validate_subject("subject", &input.subject)?;
    validate_message_body(&input.body)?;

    UserRepo::find_by_id(pool, input.recipient_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| not_found("User", input.recipient_id))?;

    if let Some(booking_id) = input.booking_id {
        let booking = booking_visible_to(pool, sender, booking_id).await?;
        validate_message_booking(input.recipient_id, &booking.parties())?;
    }

    let create = CreateMessage {
        sender_id: sender.id,
        recipient_id: input.recipient_id,
        booking_id: input.booking_id,
        subject: input.subject.trim().to_string(),
        body: input.body,
    };

    let mut tx = pool.begin().await?;
    let message = MessageRepo::create(&mut *tx, &create).await?;
    let draft = NotificationDraft::new_message(message.recipient_id, message.id, sender_email);
    notifications::emit(&mut *tx, &draft).await?;
    tx.commit().await?;

    tracing::info!(
        message_id = message.id,
        sender_id = sender.id,
        recipient_id = message.recipient_id,
        "Message sent"
    );
    Ok(message)
}

pub async fn list_messages(
    pool: &PgPool,
    actor: &Actor,
    mailbox: MessageBox,
    page: Page,
) -> AppResult<(Vec<Message>, i64)> {
    let items = MessageRepo::list(pool, actor.id, mailbox, page.limit, page.offset).await?;
    let total = MessageRepo::count(pool, actor.id, mailbox).await?;
    Ok((items, total))
}

pub async fn mark_message_read(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<Message> {
    let message = MessageRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found("Message", id))?;
    authorize_message_read(actor, id, message.sender_id, message.recipient_id)?;

    MessageRepo::mark_read(pool, id)
        .await?
        .ok_or_else(|| not_found("Message", id))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A booking referenced from a request body. Missing and invisible bookings
/// are input errors here, not 404s.
async fn booking_visible_to(pool: &PgPool, actor: &Actor, booking_id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(pool, booking_id)
        .await?
        .filter(|b| can_see_booking(&Requester::from(*actor), &b.parties()))
        .ok_or_else(|| CoreError::Validation(format!("Booking {booking_id} does not exist")).into())
}

fn validate_subject(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().chars().count() > MAX_SUBJECT_LEN {
        Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SUBJECT_LEN} characters"
        )))
    } else {
        Ok(())
    }
}
