//! Chat completion client.
//!
//! The handler talks to the completion backend through [`CompletionService`]
//! so tests can swap in a stub. [`OpenAiCompletion`] is the production
//! implementation for any OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service credential is not configured: set OPENAI_API_KEY")]
    MissingCredential,

    #[error("completion service rejected the credential ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("completion service rate limit reached: {0}")]
    RateLimited(String),

    #[error("completion request timed out after {0} ms")]
    Timeout(u64),

    #[error("failed to reach completion service: {0}")]
    Network(String),

    #[error("completion service request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion service returned an unexpected response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of a chat completion call; serialized as-is onto the wire.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the text of the first generated choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

pub struct OpenAiCompletion {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompletion {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        if self.api_key.trim().is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(status_error(status, &body));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no message content".to_string())
            })
    }
}

fn status_error(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
