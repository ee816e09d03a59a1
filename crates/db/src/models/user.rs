//! User entity model and DTOs.

use atelier_core::roles::{Actor, Role};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash; never serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub experience_years: Option<i32>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Resolve the stored `user_type` into a [`Role`].
    pub fn role(&self) -> Result<Role, atelier_core::error::CoreError> {
        Role::from_name(&self.user_type)
    }

    pub fn actor(&self) -> Result<Actor, atelier_core::error::CoreError> {
        Ok(Actor::new(self.id, self.role()?, self.is_staff))
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub is_staff: bool,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub experience_years: Option<i32>,
    pub website: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            user_type: u.user_type,
            is_staff: u.is_staff,
            phone: u.phone,
            bio: u.bio,
            company_name: u.company_name,
            experience_years: u.experience_years,
            website: u.website,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub is_staff: bool,
}

/// DTO for profile updates. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub experience_years: Option<i32>,
    pub website: Option<String>,
}
