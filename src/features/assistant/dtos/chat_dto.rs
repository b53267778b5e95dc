use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Role of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

/// One prior turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageDto {
    pub role: ChatRole,
    pub content: String,
}

/// Request DTO for the chat proxy
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequestDto {
    /// The user's message (1-10000 characters)
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Message must be between 1 and 10000 characters"
    ))]
    pub message: String,

    /// Prior turns, re-sent in full on every message; only role and
    /// content are forwarded
    #[serde(default)]
    pub history: Vec<ChatMessageDto>,

    /// Model override; defaults to the configured model
    pub model: Option<String>,
}

/// Success body of the chat proxy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponseDto {
    /// The assistant's reply
    pub response: String,
    /// Whether the exchange was persisted to durable history
    pub saved: bool,
}

/// Failure body of the chat proxy; `response` always carries a usable
/// fallback text
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatFailureDto {
    pub error: String,
    pub response: String,
}
