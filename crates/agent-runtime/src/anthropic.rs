//! Anthropic LLM Provider
//!
//! Implementation of `LlmProvider` for the Anthropic Messages API with
//! native tool use.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{ContentBlock, Message},
    provider::{Completion, CompletionRequest, LlmProvider, StopReason, TokenUsage},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";

/// Anthropic provider configuration
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.anthropic.com".into(),
            timeout_secs: 120,
        }
    }
}

impl AnthropicConfig {
    /// Read `ANTHROPIC_API_KEY` and optional `ANTHROPIC_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AgentError::Config("ANTHROPIC_API_KEY environment variable is not set".into()))?;
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| Self::default().base_url);

        Ok(Self {
            api_key,
            base_url,
            ..Default::default()
        })
    }
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<StopReason>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl AnthropicProvider {
    /// Create from configuration
    pub fn from_config(config: AnthropicConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(AnthropicConfig::from_env()?)
    }

    fn build_request<'a>(request: &CompletionRequest<'a>) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &request.options.model,
            max_tokens: request.options.max_tokens,
            system: Some(request.system).filter(|s| !s.is_empty()),
            tools: request
                .tools
                .iter()
                .map(|t| WireTool {
                    name: &t.name,
                    description: &t.description,
                    input_schema: t.input_schema(),
                })
                .collect(),
            messages: request.messages,
            temperature: request.options.temperature,
        }
    }

    fn convert_completion(response: MessagesResponse) -> Completion {
        Completion {
            content: response.content,
            stop_reason: response.stop_reason.unwrap_or(StopReason::Other),
            model: response.model,
            usage: response.usage,
        }
    }

    /// Map a non-success status to an error kind
    fn status_error(status: StatusCode, body: &str) -> AgentError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| format!("{}: {}", e.error.kind, e.error.message))
            .unwrap_or_else(|_| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(message),
            StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(message),
            s if s.is_server_error() || s.as_u16() == 529 => {
                AgentError::ProviderUnavailable(format!("{}: {}", status, message))
            }
            _ => AgentError::Provider(format!("{}: {}", status, message)),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let payload = Self::build_request(&request);

        tracing::debug!(
            model = %request.options.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AgentError::ProviderUnavailable(e.to_string())
                } else {
                    AgentError::Provider(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::Parse(format!("Invalid messages response: {}", e)))?;

        Ok(Self::convert_completion(parsed))
    }
}
