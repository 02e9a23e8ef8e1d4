//! OpenAI-compatible chat-completion provider
//!
//! Implements [`LLMProvider`] against any endpoint that speaks the
//! `/chat/completions` dialect. The generation API uses the stock OpenAI
//! base URL; the research API points the same provider at its own base URL
//! and key.
//!
//! ```no_run
//! use newsletter_llm::{CompletionRequest, Message, LLMProvider};
//! use newsletter_llm::providers::{OpenAIConfig, OpenAIProvider};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OpenAIConfig::new("pplx-...")
//!     .with_api_base("https://api.perplexity.ai")
//!     .with_name("research")
//!     .with_timeout(Duration::from_secs(60));
//! let provider = OpenAIProvider::with_config(config)?;
//!
//! let request = CompletionRequest::builder("sonar")
//!     .add_message(Message::user("Tell me about Zerodha"))
//!     .max_tokens(800)
//!     .build();
//!
//! let response = provider.complete(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, Role,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_PROVIDER_NAME: &str = "openai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for an OpenAI-compatible provider
#[derive(Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL of the API (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Name reported by [`LLMProvider::name`] (default: "openai")
    pub name: String,

    /// Per-request timeout (default: 120s)
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            name: DEFAULT_PROVIDER_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`.
    /// Optionally reads base URL from `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LLMError::ConfigurationError("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let config = Self::new(api_key);
        Ok(match std::env::var("OPENAI_API_BASE") {
            Ok(api_base) => config.with_api_base(api_base),
            Err(_) => config,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the name this provider reports in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// OpenAI-compatible provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a provider with custom configuration
    ///
    /// The configured timeout applies to every request made by this provider.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending chat completion request");

        let openai_request = OpenAIRequest {
            messages: build_openai_messages(request.system, request.messages),
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        // Only the first choice is ever requested
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        debug!(
            "Received response - stop_reason: {:?}, tokens: {}/{}",
            choice.finish_reason,
            openai_response.usage.prompt_tokens,
            openai_response.usage.completion_tokens
        );

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            stop_reason: map_stop_reason(choice.finish_reason.as_deref()),
            usage: TokenUsage {
                input_tokens: openai_response.usage.prompt_tokens,
                output_tokens: openai_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: OpenAIUsage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build the wire message list; the system prompt leads the array
fn build_openai_messages(system: Option<String>, messages: Vec<Message>) -> Vec<OpenAIMessage> {
    system
        .map(Message::system)
        .into_iter()
        .chain(messages)
        .map(|msg| OpenAIMessage {
            role: msg.role.as_str(),
            content: msg.content,
        })
        .collect()
}

fn map_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("length") => StopReason::MaxTokens,
        Some("stop") | None => StopReason::EndTurn,
        Some(other) => {
            debug!("Unknown stop reason: {}", other);
            StopReason::EndTurn
        }
    }
}
