//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user, loaded fresh from the database.
//! - [`auth::OptionalAuth`] -- anonymous-capable variant yielding a [`Requester`].
//! - [`rbac::RequireStaff`] -- requires staff rights.
//!
//! [`Requester`]: atelier_core::roles::Requester

pub mod auth;
pub mod rbac;
