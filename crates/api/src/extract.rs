//! Request body extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection renders through [`AppError`], so a missing
/// field or a malformed body answers 400 instead of axum's default 422.
///
/// ```ignore
/// async fn create(AppJson(input): AppJson<CreateThing>) -> AppResult<StatusCode> { ... }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
