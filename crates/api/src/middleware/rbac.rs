//! Role-based access control extractors.

use atelier_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires staff rights (the `is_staff` flag or the staff account kind).
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.actor.has_staff_rights() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff rights required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
