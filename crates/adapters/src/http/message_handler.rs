use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{ApiError, ErrorBody};
use super::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Destination phone number in E.164 format.
    pub to: Option<String>,
    /// Message body.
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    /// Provider-assigned message id.
    pub message_id: String,
}

/// Send a single SMS to one recipient.
///
/// The single-shot path: no record is persisted and no fan-out happens.
/// Missing `to` or `message` is rejected before any transport call.
#[utoipa::path(
    post, path = "/api/v1/messages",
    tag = "Messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message accepted by the provider", body = SendMessageResponse),
        (status = 400, description = "Missing to or message", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 500, description = "Transport failure", body = ErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let to = req.to.as_deref().unwrap_or_default();
    let message = req.message.as_deref().unwrap_or_default();

    let provider_id = state.send_service.send_single(to, message).await?;
    Ok(Json(SendMessageResponse {
        success: true,
        message_id: provider_id.0,
    }))
}
