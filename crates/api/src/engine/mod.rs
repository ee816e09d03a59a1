//! Transactional units of work behind the HTTP handlers.
//!
//! Every operation takes the acting identity explicitly. Mutating operations
//! open one database transaction, apply the rules from `atelier_core`, write
//! the state change together with any notifications it causes, and commit.
//! A failing notification insert therefore rolls back the change itself.

pub mod booking;
pub mod catalog;
pub mod ledger;
pub mod notifications;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;

use crate::error::AppError;

/// `NotFound` for `entity`, used both for missing rows and for rows the
/// requester may not see.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::not_found(entity, id))
}
