//! Row models and insert/update DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO carrying already-resolved values for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity has one

pub mod booking;
pub mod category;
pub mod design;
pub mod favorite;
pub mod message;
pub mod notification;
pub mod review;
pub mod session;
pub mod tag;
pub mod user;
