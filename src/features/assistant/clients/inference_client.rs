use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::AssistantConfig;
use crate::core::error::{AppError, Result};

/// Message shape the inference server understands
#[derive(Debug, Clone, Serialize)]
pub struct InferenceMessage {
    pub role: String,
    pub content: String,
}

/// Seam over the local inference server
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn chat(&self, model: &str, messages: &[InferenceMessage]) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

/// Client for an Ollama-compatible local inference server
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn chat(&self, model: &str, messages: &[InferenceMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChatRequest {
            model,
            messages,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!("Inference request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Inference request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Inference server returned status {}",
                response.status()
            )));
        }

        let parsed: OllamaChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse inference response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse inference response: {}", e))
        })?;

        Ok(parsed.message.content)
    }
}
