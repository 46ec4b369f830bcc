//! Chat-completion client.
//!
//! The handlers talk to the remote model through the [`CompletionClient`]
//! trait so tests can substitute a stub without touching process state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion API returned no content")]
    EmptyResponse,
}

/// A single role-tagged message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One round trip to the completion API.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Interface to the remote completion API.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the messages and return the model's text completion.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Model name for logging.
    fn model_name(&self) -> &str;
}

/// OpenAI chat-completions implementation of [`CompletionClient`].
pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        #[derive(Serialize)]
        struct ApiRequest<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: Option<String>,
        }

        debug!(model = %self.model, "calling completion API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&ApiRequest {
                model: &self.model,
                messages: &request.messages,
                temperature: request.temperature,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body: ApiResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        let system = ChatMessage::system("be terse");
        assert_eq!(system.role, "system");
        assert_eq!(system.content, "be terse");

        let user = ChatMessage::user("hello");
        assert_eq!(user.role, "user");
    }

    #[test]
    fn messages_serialize_with_role_and_content() {
        let msg = ChatMessage::user("draw me a diagram");
        let value = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "draw me a diagram");
    }
}
