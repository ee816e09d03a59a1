//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /                          -> list_reviews
/// POST   /                          -> create_review
/// POST   /{id}/approve              -> approve_review (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/{id}/approve", post(reviews::approve_review))
}
