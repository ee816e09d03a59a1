use atelier_core::policy::{ReviewFacts, ReviewScope};
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub client_id: DbId,
    pub designer_id: DbId,
    pub booking_id: Option<DbId>,
    pub rating: i16,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    pub fn facts(&self) -> ReviewFacts {
        ReviewFacts {
            client_id: self.client_id,
            designer_id: self.designer_id,
            is_approved: self.is_approved,
        }
    }
}

#[derive(Debug)]
pub struct CreateReview {
    pub client_id: DbId,
    pub designer_id: DbId,
    pub booking_id: Option<DbId>,
    pub rating: i16,
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReviewListFilter {
    pub scope: ReviewScope,
    pub designer_id: Option<DbId>,
}
