//! Domain error taxonomy shared by every layer.
//!
//! The API maps each variant to a distinct HTTP status so callers can tell a
//! malformed request (400) from a missing credential (401), a refused action
//! (403) and an invisible or missing resource (404).

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The id does not resolve, or resolves to something the requester may
    /// not see. Both cases are reported identically.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or out-of-range input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is well-formed but clashes with the current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No credential, or a credential that does not verify.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to act on this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
