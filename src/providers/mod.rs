//! LLM provider abstraction for the optional model-backed path.
//!
//! Defines the [`LlmProvider`] trait and the shared request/response types.
//! One provider is implemented: [`openai::OpenAiCompatProvider`], speaking
//! the OpenAI `/chat/completions` wire format against a configurable base
//! URL (the original deployment used Groq's OpenAI-compatible API).
//!
//! The model-backed path is a strategy-pattern alternative to the
//! rule-based pipeline, selected by configuration — never by core logic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod openai;

/// JSON Schema definition for a tool the model can call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match dispatcher registration).
    pub name: String,
    /// Description shown to the model.
    pub description: String,
    /// JSON Schema object for the tool's parameters.
    pub input_schema: serde_json::Value,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name.
    pub name: String,
    /// Parsed arguments object.
    pub arguments: serde_json::Value,
}

/// A single-turn completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt injected before the user message.
    pub system: Option<String>,
    /// The user's message.
    pub user: String,
    /// Tools available to the model for this call.
    pub tools: Vec<ToolDefinition>,
    /// Maximum tokens in the response.
    pub max_tokens: Option<u32>,
}

/// The response from a provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Plain text content, if any.
    pub text: Option<String>,
    /// Tool calls requested by the model, in order.
    pub tool_calls: Vec<ToolCall>,
    /// The model identifier that served this response.
    pub model: String,
}

/// Errors returned by model providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match the expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
}

/// Check HTTP response status and return the body text or a structured error.
///
/// # Errors
///
/// Returns [`ProviderError::Request`] on transport failure,
/// [`ProviderError::HttpStatus`] on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: truncate_error_body(&body),
        });
    }
    Ok(body)
}

fn truncate_error_body(raw: &str) -> String {
    const MAX_ERROR_BODY_CHARS: usize = 256;
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return format!("{shortened}...[truncated]");
    }
    collapsed
}

/// Tool-calling LLM provider interface.
///
/// Implementations must be `Send + Sync` for use across async task
/// boundaries.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Request a completion.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// The model identifier string this provider is instantiated for.
    fn model_id(&self) -> &str;
}
