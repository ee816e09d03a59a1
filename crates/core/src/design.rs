//! Design publication states and catalog rules.
//!
//! `draft -> pending -> {approved, rejected}`. The public creation path always
//! lands in `pending`; only staff move a design out of it. There is no
//! resubmission transition, so `rejected` is terminal here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::{ensure_fits_column, validate_amount, Money};
use crate::roles::Actor;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Maximum design title length (matches the `designs.title` column).
pub const MAX_TITLE_LEN: usize = 200;

/// Image file extensions accepted by the upload endpoint.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl DesignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid design status '{other}'"
            ))),
        }
    }

    /// Status assigned by the public creation path, whatever the caller asked for.
    pub fn on_create(_requested: Option<Self>) -> Self {
        Self::Pending
    }
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff decision on a submitted design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Approve,
    Reject,
}

impl ModerationDecision {
    pub fn target(self) -> DesignStatus {
        match self {
            Self::Approve => DesignStatus::Approved,
            Self::Reject => DesignStatus::Rejected,
        }
    }
}

/// Designers (and staff) create designs; clients cannot.
pub fn authorize_create(actor: &Actor) -> Result<(), CoreError> {
    if crate::policy::can_create_design(actor) {
        Ok(())
    } else {
        Err(CoreError::forbidden("Only designers can publish designs."))
    }
}

/// Check who may moderate and from which state, returning the new status.
pub fn moderate(
    actor: &Actor,
    current: DesignStatus,
    decision: ModerationDecision,
) -> Result<DesignStatus, CoreError> {
    if !crate::policy::can_moderate(actor) {
        return Err(CoreError::forbidden("Only staff can moderate designs."));
    }
    match current {
        DesignStatus::Draft | DesignStatus::Pending => Ok(decision.target()),
        done => Err(CoreError::Conflict(format!(
            "Design has already been {done}"
        ))),
    }
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("title must not be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Money) -> Result<Money, CoreError> {
    validate_amount("price", price)
}

/// Optional width/height in metres; when given they must be positive.
pub fn validate_dimension(field: &str, value: Option<Money>) -> Result<(), CoreError> {
    match value {
        Some(v) if v <= Money::ZERO => Err(CoreError::Validation(format!(
            "{field} must be greater than 0"
        ))),
        Some(v) => ensure_fits_column(field, v).map(|_| ()),
        None => Ok(()),
    }
}

/// Lower-cased extension of an uploaded file, if it is a supported image.
pub fn image_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '{file_name}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// The `is_primary` form flag only ever applies to the first uploaded image.
pub fn is_primary_image(index: usize, is_primary_flag: Option<&str>) -> bool {
    index == 0 && is_primary_flag.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
