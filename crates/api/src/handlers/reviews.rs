//! Handlers for the `/reviews` resource.

use atelier_core::pagination::Page;
use atelier_core::types::DbId;
use atelier_db::models::review::Review;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::engine::ledger::{self, NewReview};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub designer: DbId,
    pub booking: Option<DbId>,
    pub rating: i16,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

/// Query parameters for `GET /reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    pub designer: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/reviews
///
/// Approved reviews for everyone, plus unapproved ones the caller wrote or
/// is the subject of. Staff see all.
pub async fn list_reviews(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Query(params): Query<ReviewListParams>,
) -> AppResult<Json<PageResponse<Review>>> {
    let page = Page::new(params.limit, params.offset);
    let (items, total) =
        ledger::list_reviews(&state.pool, &requester, params.designer, page).await?;
    Ok(Json(PageResponse::new(items, total, page)))
}

/// POST /api/v1/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    input.validate()?;
    let review = ledger::create_review(
        &state.pool,
        &auth.actor,
        &auth.user.email,
        NewReview {
            designer_id: input.designer,
            booking_id: input.booking,
            rating: input.rating,
            title: input.title,
            comment: input.comment,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// POST /api/v1/reviews/{id}/approve
pub async fn approve_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = ledger::approve_review(&state.pool, &auth.actor, id).await?;
    Ok(Json(DataResponse { data: review }))
}
