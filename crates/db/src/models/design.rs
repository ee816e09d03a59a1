//! Design, design image and listing filter models.

use atelier_core::design::DesignStatus;
use atelier_core::error::CoreError;
use atelier_core::money::Money;
use atelier_core::policy::{DesignFacts, DesignScope};
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `designs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Design {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub designer_id: DbId,
    pub category_id: Option<DbId>,
    pub price: Money,
    pub status: String,
    pub is_premium: bool,
    pub views: i64,
    pub likes: i64,
    pub width: Option<Money>,
    pub height: Option<Money>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Design {
    pub fn status(&self) -> Result<DesignStatus, CoreError> {
        DesignStatus::from_name(&self.status)
    }

    /// The fields visibility checks look at.
    pub fn facts(&self) -> Result<DesignFacts, CoreError> {
        Ok(DesignFacts {
            designer_id: self.designer_id,
            status: self.status()?,
        })
    }
}

/// Insert DTO; the status has already been decided by the caller.
#[derive(Debug)]
pub struct CreateDesign {
    pub title: String,
    pub description: String,
    pub designer_id: DbId,
    pub category_id: Option<DbId>,
    pub price: Money,
    pub status: DesignStatus,
    pub is_premium: bool,
    pub width: Option<Money>,
    pub height: Option<Money>,
}

/// Patch DTO. Owner and status are absent. For the nullable columns the
/// outer `None` leaves the value alone and `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct UpdateDesign {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Option<DbId>>,
    pub price: Option<Money>,
    pub is_premium: Option<bool>,
    pub width: Option<Option<Money>>,
    pub height: Option<Option<Money>>,
}

/// Filters for `GET /designs` on top of the requester's visibility scope.
#[derive(Debug, Clone)]
pub struct DesignListFilter {
    pub scope: DesignScope,
    pub category_id: Option<DbId>,
    pub status: Option<DesignStatus>,
    pub is_premium: Option<bool>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    pub tag_id: Option<DbId>,
}

impl DesignListFilter {
    pub fn new(scope: DesignScope) -> Self {
        Self {
            scope,
            category_id: None,
            status: None,
            is_premium: None,
            search: None,
            tag_id: None,
        }
    }
}

/// A row from the `design_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignImage {
    pub id: DbId,
    pub design_id: DbId,
    pub image_url: String,
    pub is_primary: bool,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateDesignImage {
    pub design_id: DbId,
    pub image_url: String,
    pub is_primary: bool,
    pub caption: Option<String>,
}
