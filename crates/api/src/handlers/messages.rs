//! Handlers for the `/messages` resource. All endpoints require authentication.

use atelier_core::ledger::MessageBox;
use atelier_core::pagination::Page;
use atelier_core::types::DbId;
use atelier_db::models::message::Message;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::engine::ledger::{self, NewMessage};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub recipient: DbId,
    pub booking: Option<DbId>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    #[serde(default)]
    pub subject: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
}

/// Query parameters for `GET /messages`.
#[derive(Debug, Default, Deserialize)]
pub struct MessageListParams {
    /// `inbox` (default) or `sent`.
    #[serde(rename = "box")]
    pub mailbox: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MessageListParams>,
) -> AppResult<Json<PageResponse<Message>>> {
    let mailbox = params
        .mailbox
        .as_deref()
        .map(MessageBox::from_name)
        .transpose()?
        .unwrap_or_default();
    let page = Page::new(params.limit, params.offset);
    let (items, total) = ledger::list_messages(&state.pool, &auth.actor, mailbox, page).await?;
    Ok(Json(PageResponse::new(items, total, page)))
}

/// POST /api/v1/messages
///
/// The recipient is notified in the same transaction.
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    input.validate()?;
    let message = ledger::send_message(
        &state.pool,
        &auth.actor,
        &auth.user.email,
        NewMessage {
            recipient_id: input.recipient,
            booking_id: input.booking,
            subject: input.subject,
            body: input.body,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// POST /api/v1/messages/{id}/mark_read
///
/// Recipient only; the sender gets 403 and anyone else 404.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = ledger::mark_message_read(&state.pool, &auth.actor, id).await?;
    Ok(Json(DataResponse { data: message }))
}
