//! Chat client for the external AI service
//!
//! The generation engine talks to the model through the [`ChatClient`]
//! trait so the transport can be swapped out (and mocked in tests).
//! The bundled implementation posts to an HTTP chat endpoint described
//! by [`ChatConfig`]; an unset endpoint means the capability is
//! unavailable, which callers treat as a recoverable failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("chat endpoint is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat request failed: {status} - {message}")]
    Api { status: u16, message: String },
}

/// One message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Request body sent to the chat endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
}

/// Response from the chat endpoint; `message.content` carries the text
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Connection settings for the chat endpoint, read from `config.json`
/// in the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    /// Chat endpoint URL; unset means AI generation is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: default_model(),
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// HTTP-backed chat client
pub struct HttpChatClient {
    client: reqwest::Client,
    config: ChatConfig,
}

impl HttpChatClient {
    /// No request timeout is set: a generation is a single awaited
    /// call the caller retries by invoking generate again.
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let Some(base_url) = self.config.base_url.as_deref() else {
            return Err(ChatError::NotConfigured);
        };

        let mut req = self.client.post(base_url).json(&request);
        if let Some(key) = self.config.api_key.as_deref() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: ChatConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, None);
        assert_eq!(config.model, "claude-sonnet-4-20250514");
    }

    #[tokio::test]
    async fn test_unconfigured_client_errors() {
        let client = HttpChatClient::new(ChatConfig::default());
        let request = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            model: "m".to_string(),
        };

        assert!(matches!(
            client.chat(request).await,
            Err(ChatError::NotConfigured)
        ));
    }
}
