//! Route definitions for the `/messages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// GET    /                          -> list_messages (?box=inbox|sent)
/// POST   /                          -> send_message
/// POST   /{id}/mark_read            -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(messages::list_messages).post(messages::send_message),
        )
        .route("/{id}/mark_read", post(messages::mark_read))
}
