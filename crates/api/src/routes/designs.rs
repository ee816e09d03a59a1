//! Route definitions for the `/designs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

/// Routes mounted at `/designs`.
///
/// ```text
/// GET    /                          -> list_designs
/// POST   /                          -> create_design
/// GET    /{id}                      -> get_design
/// PATCH  /{id}                      -> update_design
/// DELETE /{id}                      -> delete_design
/// POST   /{id}/approve              -> approve_design
/// POST   /{id}/reject               -> reject_design
/// POST   /{id}/like                 -> like_design
/// GET    /{id}/images               -> list_images
/// POST   /{id}/upload_images        -> upload_images
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(designs::list_designs).post(designs::create_design),
        )
        .route(
            "/{id}",
            get(designs::get_design)
                .patch(designs::update_design)
                .delete(designs::delete_design),
        )
        .route("/{id}/approve", post(designs::approve_design))
        .route("/{id}/reject", post(designs::reject_design))
        .route("/{id}/like", post(designs::like_design))
        .route("/{id}/images", get(designs::list_images))
        .route("/{id}/upload_images", post(designs::upload_images))
}
