//! Actor kinds and the per-request identity passed to every engine operation.
//!
//! Role names must match the `users.user_type` CHECK constraint in the
//! initial migration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_DESIGNER: &str = "designer";
pub const ROLE_STAFF: &str = "staff";

/// Closed set of account kinds.
///
/// Staff rights are additionally granted by the orthogonal `is_staff` flag on
/// [`Actor`], so a designer can hold staff rights without changing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Designer,
    Staff,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => ROLE_CLIENT,
            Self::Designer => ROLE_DESIGNER,
            Self::Staff => ROLE_STAFF,
        }
    }

    /// Parse from the database `user_type` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_CLIENT => Ok(Self::Client),
            ROLE_DESIGNER => Ok(Self::Designer),
            ROLE_STAFF => Ok(Self::Staff),
            other => Err(CoreError::Validation(format!(
                "Unknown user type '{other}'. Must be one of: {ROLE_CLIENT}, {ROLE_DESIGNER}"
            ))),
        }
    }

    /// Only clients and designers may sign up through the public flow.
    pub fn is_self_registrable(self) -> bool {
        matches!(self, Self::Client | Self::Designer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
    pub is_staff: bool,
}

impl Actor {
    pub fn new(id: DbId, role: Role, is_staff: bool) -> Self {
        Self { id, role, is_staff }
    }

    /// Staff rights come from either the flag or the staff account kind.
    pub fn has_staff_rights(&self) -> bool {
        self.is_staff || self.role == Role::Staff
    }

    pub fn is(&self, user_id: DbId) -> bool {
        self.id == user_id
    }
}

/// Whoever issued a request: possibly nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Anonymous,
    Authenticated(Actor),
}

impl Requester {
    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(actor) => Some(actor),
        }
    }

    pub fn user_id(&self) -> Option<DbId> {
        self.actor().map(|a| a.id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_staff(&self) -> bool {
        self.actor().is_some_and(Actor::has_staff_rights)
    }

    /// `true` only for an authenticated requester with the given id.
    pub fn is_user(&self, user_id: DbId) -> bool {
        self.actor().is_some_and(|a| a.is(user_id))
    }

    /// Fail with `Unauthorized` for anonymous requests.
    pub fn require_actor(&self) -> Result<&Actor, CoreError> {
        self.actor().ok_or_else(|| {
            CoreError::Unauthorized("Authentication credentials were not provided".into())
        })
    }
}

impl From<Actor> for Requester {
    fn from(actor: Actor) -> Self {
        Self::Authenticated(actor)
    }
}
