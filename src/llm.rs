//! Language model boundary.
//!
//! The translator only needs one thing from a model: given a system
//! instruction and the user's text, return a completion. [`OllamaClient`]
//! provides that over Ollama's `/api/chat` endpoint; tests substitute their
//! own [`LanguageModel`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::LlmConfig;

/// Errors from the language model service.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The service could not be reached or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with an error status
    #[error("model returned {status}: {message}")]
    Response {
        /// HTTP status code
        status: u16,
        /// Error reported by the service
        message: String,
    },

    /// The reply could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// What they said
    pub content: String,
}

/// A system instruction plus the user's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// System instruction
    pub system: String,
    /// User text, passed through unchanged
    pub user: String,
}

impl ChatRequest {
    /// The request as the two-turn message list sent to the model.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: Role::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: self.user.clone(),
            },
        ]
    }
}

/// A chat-completion model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `request`, returning the model's text.
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

/// Ollama chat request format.
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Ollama chat response format.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

/// Ollama error response format.
#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// The `error` field of an Ollama error body, or the raw body otherwise.
fn error_message(body: String) -> String {
    serde_json::from_str::<OllamaErrorResponse>(&body).map_or(body, |parsed| parsed.error)
}

/// Client for an Ollama-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client from configuration.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(&config.host, &config.model, config.timeout_secs)
    }

    /// Create a client with explicit parameters.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: request.messages(),
            stream: false,
        };

        debug!(url = %self.chat_url(), model = %self.model, "Sending chat request");
        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Response {
                status: status.as_u16(),
                message: error_message(text),
            });
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(reply.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_two_turns() {
        let request = ChatRequest {
            system: "rules".to_string(),
            user: "hola".to_string(),
        };
        let body = OllamaChatRequest {
            model: "llama3.2",
            messages: request.messages(),
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hola");
    }

    #[test]
    fn test_response_decodes_content() {
        let raw = r#"{"model":"llama3.2","message":{"role":"assistant","content":"SQL{SELECT 1}"},"done":true}"#;
        let reply: OllamaChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.message.content, "SQL{SELECT 1}");
    }

    #[test]
    fn test_error_body_field_extracted() {
        let body = r#"{"error":"model 'llama3.2' not found, try pulling it first"}"#;
        assert_eq!(
            error_message(body.to_string()),
            "model 'llama3.2' not found, try pulling it first"
        );
    }

    #[test]
    fn test_error_body_falls_back_to_raw_text() {
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
        assert_eq!(
            error_message(r#"{"detail":"nope"}"#.to_string()),
            r#"{"detail":"nope"}"#
        );
        assert_eq!(error_message(String::new()), "");
    }

    #[test]
    fn test_response_error_display() {
        let err = LlmError::Response {
            status: 404,
            message: error_message(r#"{"error":"model not found"}"#.to_string()),
        };
        assert_eq!(err.to_string(), "model returned 404: model not found");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2", 5).unwrap();
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model_name(), "llama3.2");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3.2", 2).unwrap();
        let result = client
            .chat(ChatRequest {
                system: String::new(),
                user: "hola".to_string(),
            })
            .await;
        assert!(matches!(result, Err(LlmError::Transport(_))));
    }
}
