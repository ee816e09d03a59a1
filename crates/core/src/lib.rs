//! Atelier domain core.
//!
//! Pure rules with no database or HTTP dependencies: the actor/role model,
//! the visibility policy, the booking and design state machines, the
//! notification catalogue and the blob-store seam.

pub mod blob;
pub mod booking;
pub mod design;
pub mod error;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod pagination;
pub mod policy;
pub mod roles;
pub mod types;
