/// LLM Client: the single point of entry for all text-generation calls.
///
/// No other module talks to the provider directly: handlers and the
/// generation pipeline depend on the `CompletionClient` trait, and
/// `OpenAiClient` is the production implementation wired up in `main`.
///
/// One HTTP call per `complete`. There is no retry: callers either fall back
/// to local content or surface the error.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ApiCredential, OpenAiConfig};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is not configured properly")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-call sampling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    /// `None` leaves the provider default in place.
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    pub const fn new(max_tokens: u32, temperature: Option<f32>) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Everything the provider needs for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

impl CompletionRequest {
    /// A single user prompt with no system message.
    pub fn from_prompt(prompt: impl Into<String>, options: CompletionOptions) -> Self {
        Self {
            system: None,
            messages: vec![ChatMessage::user(prompt)],
            options,
        }
    }
}

/// The completion provider seen by the rest of the service.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw completion text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
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
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// OpenAI-compatible chat completions client.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    credential: ApiCredential,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            credential: config.credential.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self
            .credential
            .valid_key()
            .ok_or(LlmError::NotConfigured)?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: &m.role,
            content: &m.content,
        }));

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            warn!("LLM API rate limited the request");
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Stub clients for driving the pipeline and handlers in tests.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Fails every call, as an unreachable provider would.
    pub struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    /// Answers every call with the same text and records the last request.
    pub struct ScriptedClient {
        reply: String,
        last: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedClient {
        pub fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                last: Mutex::new(None),
            }
        }

        pub fn last_request(&self) -> Option<CompletionRequest> {
            self.last.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            *self.last.lock().unwrap() = Some(request.clone());
            Ok(self.reply.clone())
        }
    }
}
