use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::assistant::clients::{InferenceBackend, InferenceMessage};
use crate::features::assistant::dtos::{ChatMessageDto, ChatRequestDto, ChatResponseDto};
use crate::features::auth::model::AuthenticatedUser;

/// Reply served when the inference call fails
pub const FALLBACK_REPLY: &str =
    "Lo siento, el asistente no está disponible en este momento. Por favor intenta de nuevo más tarde.";

/// System prompt for the operations assistant
const SYSTEM_PROMPT: &str = r#"You are the Centinela operations assistant, helping staff of a hospitality operation with their daily work.

## Your Role
1. Answer questions about incident reporting: how to classify an incident, which area and priority to pick, what happens after submission
2. Help with the cash-payment log: what information a payment entry needs and how the quincena reporting windows work
3. Explain what the dashboards show (per-reporter statistics, priority counters)
4. Be concise and practical; staff are usually mid-task

## Priorities
- **critica**: danger to people or major service interruption, act immediately
- **alta**: blocks work in an area, same-day attention
- **media**: degraded but working, schedule it
- **baja**: cosmetic or minor, batch it

## Conversation Guidelines
- Answer in the language the user writes in (Spanish or English)
- If a question needs data you cannot see, say so and point to the relevant screen
- Never invent incident numbers, amounts or names
- For anything outside operations (HR, payroll, personal matters), politely point the user to the right channel"#;

/// Service for the chat assistant proxy
pub struct AssistantService {
    pool: PgPool,
    backend: Arc<dyn InferenceBackend>,
    default_model: String,
}

impl AssistantService {
    pub fn new(pool: PgPool, backend: Arc<dyn InferenceBackend>, default_model: String) -> Self {
        Self {
            pool,
            backend,
            default_model,
        }
    }

    /// Forward the conversation to the inference server.
    ///
    /// With an authenticated session the exchange is persisted best-effort;
    /// persistence failure is logged and reported via `saved: false` only.
    pub async fn send(
        &self,
        dto: ChatRequestDto,
        user: Option<&AuthenticatedUser>,
    ) -> Result<ChatResponseDto> {
        let model = dto.model.as_deref().unwrap_or(&self.default_model);
        let messages = build_messages(&dto.message, &dto.history);

        let reply = self.backend.chat(model, &messages).await?;

        let saved = match user {
            Some(user) => {
                self.persist_exchange(user, &dto.message, &reply, model)
                    .await
            }
            None => false,
        };

        Ok(ChatResponseDto {
            response: reply,
            saved,
        })
    }

    /// Append the user message and the reply as two immutable rows
    async fn persist_exchange(
        &self,
        user: &AuthenticatedUser,
        message: &str,
        reply: &str,
        model: &str,
    ) -> bool {
        let result = async {
            sqlx::query(
                "INSERT INTO chat_messages (account_id, role, content, model) VALUES ($1, 'user', $2, $3)",
            )
            .bind(&user.account_id)
            .bind(message)
            .bind(model)
            .execute(&self.pool)
            .await?;

            sqlx::query(
                "INSERT INTO chat_messages (account_id, role, content, model) VALUES ($1, 'assistant', $2, $3)",
            )
            .bind(&user.account_id)
            .bind(reply)
            .bind(model)
            .execute(&self.pool)
            .await?;

            Ok::<(), sqlx::Error>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist chat exchange: {:?}", e);
                false
            }
        }
    }
}

/// System prompt first, then the prior turns mapped to role+content only,
/// then the new user message. The full history is re-sent every turn.
pub fn build_messages(message: &str, history: &[ChatMessageDto]) -> Vec<InferenceMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    messages.push(InferenceMessage {
        role: "system".to_string(),
        content: SYSTEM_PROMPT.to_string(),
    });

    for turn in history {
        messages.push(InferenceMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        });
    }

    messages.push(InferenceMessage {
        role: "user".to_string(),
        content: message.to_string(),
    });

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::assistant::dtos::ChatRole;

    #[test]
    fn test_build_messages_prefixes_system_prompt() {
        let history = vec![
            ChatMessageDto {
                role: ChatRole::User,
                content: "hola".to_string(),
            },
            ChatMessageDto {
                role: ChatRole::Assistant,
                content: "buenas".to_string(),
            },
        ];

        let messages = build_messages("¿cómo reporto una fuga?", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hola");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "¿cómo reporto una fuga?");
    }

    #[test]
    fn test_build_messages_without_history() {
        let messages = build_messages("hello", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_fallback_reply_is_usable() {
        assert!(!FALLBACK_REPLY.is_empty());
    }
}
