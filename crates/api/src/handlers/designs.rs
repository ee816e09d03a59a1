//! Handlers for the `/designs` resource, including moderation, likes and
//! image uploads.

use atelier_core::design::{DesignStatus, ModerationDecision};
use atelier_core::money::{blank_as_none, Money};
use atelier_core::pagination::Page;
use atelier_core::policy::DesignerFilter;
use atelier_core::roles::Requester;
use atelier_core::types::{nullable, DbId};
use atelier_db::models::design::{Design, DesignImage, UpdateDesign};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::catalog::{self, DesignQuery, NewDesign, UploadedFile};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /designs`.
#[derive(Debug, Default, Deserialize)]
pub struct DesignListParams {
    /// `me` or a designer id. Anything else is ignored.
    pub designer: Option<String>,
    pub category: Option<DbId>,
    pub status: Option<String>,
    pub is_premium: Option<bool>,
    pub search: Option<String>,
    pub tag: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /designs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDesignRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<DbId>,
    pub price: Money,
    /// Accepted for compatibility and ignored.
    pub status: Option<DesignStatus>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub width: Option<Money>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub height: Option<Money>,
    #[serde(default)]
    pub tags: Vec<DbId>,
}

/// Request body for `PATCH /designs/{id}`. Owner and status are not patchable.
///
/// `category`, `width` and `height` are cleared by an explicit `null`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDesignRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub category: Option<Option<DbId>>,
    pub price: Option<Money>,
    pub is_premium: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize_patch")]
    pub width: Option<Option<Money>>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize_patch")]
    pub height: Option<Option<Money>>,
}

/// A design with its tag ids and images.
#[derive(Debug, Serialize)]
pub struct DesignDetail {
    #[serde(flatten)]
    pub design: Design,
    pub tags: Vec<DbId>,
    pub images: Vec<DesignImage>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub status: &'static str,
    pub likes: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/designs
///
/// Staff see every design, signed-in users see approved designs plus their
/// own, anonymous callers see approved designs only.
pub async fn list_designs(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Query(params): Query<DesignListParams>,
) -> AppResult<Json<PageResponse<Design>>> {
    let page = Page::new(params.limit, params.offset);
    let query = DesignQuery {
        designer: params.designer.as_deref().and_then(DesignerFilter::parse),
        category_id: params.category,
        status: params
            .status
            .as_deref()
            .map(DesignStatus::from_name)
            .transpose()?,
        is_premium: params.is_premium,
        search: params.search,
        tag_id: params.tag,
    };

    let (items, total) = catalog::list_designs(&state.pool, &requester, query, page).await?;
    Ok(Json(PageResponse::new(items, total, page)))
}

/// POST /api/v1/designs
///
/// Designers (and staff) submit a design. It is stored as `pending`.
pub async fn create_design(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateDesignRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DesignDetail>>)> {
    input.validate()?;

    let design = catalog::create_design(
        &state.pool,
        &auth.actor,
        NewDesign {
            title: input.title,
            description: input.description,
            category_id: input.category,
            price: input.price,
            status: input.status,
            is_premium: input.is_premium,
            width: input.width,
            height: input.height,
            tag_ids: input.tags,
        },
    )
    .await?;

    let detail = detail(&state, design).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/designs/{id}
///
/// Counts a view on every successful read.
pub async fn get_design(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DesignDetail>>> {
    let design = catalog::view_design(&state.pool, &requester, id).await?;
    let detail = detail(&state, design).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/designs/{id}
pub async fn update_design(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateDesignRequest>,
) -> AppResult<Json<DataResponse<Design>>> {
    input.validate()?;

    let patch = UpdateDesign {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        category_id: input.category,
        price: input.price,
        is_premium: input.is_premium,
        width: input.width,
        height: input.height,
    };
    let design = catalog::update_design(&state.pool, &auth.actor, id, patch).await?;
    Ok(Json(DataResponse { data: design }))
}

/// DELETE /api/v1/designs/{id}
pub async fn delete_design(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    catalog::delete_design(&state.pool, &auth.actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/designs/{id}/approve
pub async fn approve_design(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Design>>> {
    let design =
        catalog::moderate(&state.pool, &auth.actor, id, ModerationDecision::Approve).await?;
    Ok(Json(DataResponse { data: design }))
}

/// POST /api/v1/designs/{id}/reject
pub async fn reject_design(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Design>>> {
    let design =
        catalog::moderate(&state.pool, &auth.actor, id, ModerationDecision::Reject).await?;
    Ok(Json(DataResponse { data: design }))
}

/// POST /api/v1/designs/{id}/like
///
/// Open to anyone who can see the design; every call counts.
pub async fn like_design(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<LikeResponse>> {
    let likes = catalog::like_design(&state.pool, &requester, id).await?;
    Ok(Json(LikeResponse {
        status: "design liked",
        likes,
    }))
}

/// GET /api/v1/designs/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    OptionalAuth(requester): OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DesignImage>>>> {
    let images = catalog::list_images(&state.pool, &requester, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/designs/{id}/upload_images
///
/// Multipart form: one or more `images` (or `images[]`) file parts, an
/// optional `is_primary` flag and an optional `caption`.
pub async fn upload_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<DesignImage>>>)> {
    let mut files = Vec::new();
    let mut is_primary: Option<String> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("images") | Some("images[]") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                files.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            Some("is_primary") => {
                is_primary = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            Some("caption") => {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let images = catalog::upload_images(
        &state.pool,
        state.blobs.as_ref(),
        &Requester::from(auth.actor),
        id,
        files,
        is_primary.as_deref(),
        caption.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: images })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn detail(state: &AppState, design: Design) -> AppResult<DesignDetail> {
    let tags = catalog::design_tags(&state.pool, design.id).await?;
    let images = catalog::design_images(&state.pool, design.id).await?;
    Ok(DesignDetail {
        design,
        tags,
        images,
    })
}
