//! Language model completions
//!
//! Everything docport asks of a model goes through [`Llm::complete`]: send a
//! prompt, get text back together with its token cost. Providers are plain
//! blocking HTTP clients; there is no retry, a failed request fails the file
//! it was made for.

pub mod anthropic;
pub mod gemini;
pub mod models;
pub mod openai;

use std::ops::{Add, AddAssign};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DocportError, Result};

pub use anthropic::AnthropicLlm;
pub use gemini::GeminiLlm;
pub use models::{find_model, ModelInfo, Provider, MODELS};
pub use openai::OpenAiLlm;

/// Token counts of one or more completions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

impl Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, other: TokenUsage) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input_tokens + other.input_tokens,
            output_tokens: self.output_tokens + other.output_tokens,
            total_tokens: self.total_tokens + other.total_tokens,
        }
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: TokenUsage) {
        *self = *self + other;
    }
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} input, {} output)",
            self.total_tokens, self.input_tokens, self.output_tokens
        )
    }
}

/// Completion text and what it cost
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
    pub usage: TokenUsage,
}

/// A completion service
pub trait Llm {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Model id sent with each request
    fn model(&self) -> &str;

    /// Complete `prompt`. With `json` set the provider is asked to answer
    /// with JSON only, in whatever way it supports.
    fn complete(&self, prompt: &str, json: bool) -> Result<LlmResponse>;
}

/// Sampling settings shared by every provider
#[derive(Debug, Clone)]
pub struct LlmOptions {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

/// Build a client for `model_id`.
///
/// The key comes from `api_key` or, failing that, the provider's
/// environment variable. Unknown models and missing keys are configuration
/// errors and fail before any request is made.
pub fn create_llm(
    model_id: &str,
    api_key: Option<&str>,
    temperature: f32,
    max_output_tokens: Option<u32>,
    timeout: Duration,
) -> Result<Box<dyn Llm>> {
    let info = find_model(model_id)
        .ok_or_else(|| DocportError::UnsupportedModel(model_id.to_string()))?;
    let provider = info.provider;

    let api_key = match api_key.filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => std::env::var(provider.env_var())
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DocportError::MissingApiKey {
                provider: provider.display_name().to_string(),
                env_var: provider.env_var().to_string(),
            })?,
    };

    let options = LlmOptions {
        api_key,
        model: info.id.to_string(),
        temperature,
        max_output_tokens: max_output_tokens.unwrap_or_else(|| info.default_max_output_tokens()),
        timeout,
    };
    debug!(
        "Using {} model {} (max {} output tokens)",
        provider.display_name(),
        options.model,
        options.max_output_tokens
    );

    Ok(match provider {
        Provider::Anthropic => Box::new(AnthropicLlm::new(options)),
        Provider::OpenAi => Box::new(OpenAiLlm::new(options)),
        Provider::Gemini => Box::new(GeminiLlm::new(options)),
    })
}

// ============================================================================
// Transport
// ============================================================================

pub(crate) fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

/// POST a JSON body and decode the JSON answer, folding every failure into
/// [`DocportError::Llm`]
pub(crate) fn post_json<T: serde::de::DeserializeOwned>(
    request: ureq::Request,
    body: &serde_json::Value,
    provider: &str,
) -> Result<T> {
    let llm_error = |message: String| DocportError::Llm {
        provider: provider.to_string(),
        message,
    };

    let response = request.send_json(body).map_err(|err| match err {
        ureq::Error::Status(status, response) => {
            let detail = response.into_string().unwrap_or_default();
            llm_error(format!("HTTP {}: {}", status, detail.trim()))
        }
        ureq::Error::Transport(transport) => llm_error(transport.to_string()),
    })?;

    response
        .into_json()
        .map_err(|e| llm_error(format!("invalid response body: {}", e)))
}

/// Rough token count for providers that do not report usage
pub(crate) fn estimate_tokens(text: &str) -> u64 {
    (text.len() as u64).div_ceil(4)
}
