//! Handlers for the `/favorites` resource. All endpoints require authentication.

use atelier_core::types::DbId;
use atelier_db::models::favorite::Favorite;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::engine::ledger;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /favorites`.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub design: DbId,
}

/// GET /api/v1/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<Favorite>>> {
    let page = params.page();
    let (items, total) = ledger::list_favorites(&state.pool, &auth.actor, page).await?;
    Ok(Json(PageResponse::new(items, total, page)))
}

/// POST /api/v1/favorites
///
/// 201 when the favorite is new, 200 when it already existed.
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Favorite>>)> {
    let (favorite, created) = ledger::add_favorite(&state.pool, &auth.actor, input.design).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: favorite })))
}

/// DELETE /api/v1/favorites/{design_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(design_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ledger::remove_favorite(&state.pool, &auth.actor, design_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
