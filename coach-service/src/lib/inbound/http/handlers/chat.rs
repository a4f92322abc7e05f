use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Proxy a chat message to the hosted coaching model.
///
/// Reachable only through the authentication middleware; any role may
/// chat.
pub async fn chat(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<ChatRequestBody>,
) -> Result<ApiSuccess<ChatResponseData>, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    tracing::debug!(user_id = %current_user.user_id, "Forwarding chat message");

    let reply = state.chat_model.send(message).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChatResponseData { response: reply },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponseData {
    pub response: String,
}
