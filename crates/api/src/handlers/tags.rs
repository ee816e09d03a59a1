//! Handlers for the `/tags` resource.

use atelier_db::models::tag::{CreateTag, Tag};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::engine::catalog;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = catalog::list_tags(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// Any authenticated user may add a tag. Duplicate names return 409.
pub async fn create_tag(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(input): AppJson<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    let tag = catalog::create_tag(&state.pool, &input.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}
