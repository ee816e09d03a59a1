//! JWT-based authentication extractors for Axum handlers.

use atelier_core::error::CoreError;
use atelier_core::roles::{Actor, Requester};
use atelier_db::models::user::User;
use atelier_db::repositories::UserRepo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The user row is re-read on every request, so role and staff changes take
/// effect immediately and deactivated accounts are locked out even while
/// their tokens are unexpired.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.actor.id, role = %auth.actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;
        resolve(token, state).await
    }
}

/// The requester of an anonymous-capable endpoint.
///
/// A missing `Authorization` header yields [`Requester::Anonymous`]; a header
/// that is present but does not verify is still rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuth(pub Requester);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            None => Ok(OptionalAuth(Requester::Anonymous)),
            Some(token) => {
                let auth = resolve(token, state).await?;
                Ok(OptionalAuth(Requester::from(auth.actor)))
            }
        }
    }
}

/// `Ok(None)` when no header is sent at all.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(Some)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })
}

async fn resolve(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "User not found or inactive".into(),
            ))
        })?;

    let actor = user.actor()?;
    Ok(AuthUser { actor, user })
}
