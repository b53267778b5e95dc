use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::assistant::dtos::{ChatFailureDto, ChatRequestDto, ChatResponseDto};
use crate::features::assistant::services::{AssistantService, FALLBACK_REPLY};
use crate::features::auth::JwtValidator;

/// State for the chat handler
#[derive(Clone)]
pub struct ChatState {
    pub assistant: Arc<AssistantService>,
    pub validator: Arc<JwtValidator>,
}

/// Send a message to the assistant.
///
/// Works without authentication; a valid bearer token additionally persists
/// the exchange as durable history. An inference failure never surfaces as
/// an unhandled error: the response body always carries a usable fallback
/// text.
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "assistant",
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Inference failure with fallback text", body = ChatFailureDto)
    )
)]
pub async fn chat(
    State(state): State<ChatState>,
    headers: HeaderMap,
    Json(dto): Json<ChatRequestDto>,
) -> Response {
    if let Err(e) = dto.validate() {
        return AppError::Validation(e.to_string()).into_response();
    }

    // Optional session: a valid bearer token enables history persistence,
    // anything else leaves the chat usable without it
    let user = match bearer_token(&headers) {
        Some(token) => match state.validator.validate_token(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring invalid bearer token on chat: {}", e);
                None
            }
        },
        None => None,
    };

    match state.assistant.send(dto, user.as_ref()).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("Chat proxy failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatFailureDto {
                    error: e.to_string(),
                    response: FALLBACK_REPLY.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
