//! Handlers for the `/categories` resource.
//!
//! Reads are public (inactive categories are staff-only); writes need staff.

use atelier_core::types::DbId;
use atelier_db::models::category::{Category, CreateCategory, UpdateCategory};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::engine::catalog;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::OptionalAuth;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = catalog::list_categories(&state.pool, &requester).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = catalog::get_category(&state.pool, &requester, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let category = catalog::create_category(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PATCH /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = catalog::update_category(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: category }))
}
