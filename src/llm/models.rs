//! Supported models
//!
//! Chat-capable models of the three providers with their output and input
//! token limits.

use serde::Serialize;

/// Completion provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Google Gemini",
        }
    }

    /// Environment variable consulted when no key is passed
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// One entry of the model table
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: Provider,
    pub max_output_tokens: Option<u32>,
    pub max_input_tokens: Option<u32>,
}

impl ModelInfo {
    /// Output budget used when the configuration does not set one
    pub fn default_max_output_tokens(&self) -> u32 {
        self.max_output_tokens.unwrap_or(match self.provider {
            Provider::Gemini => 8192,
            Provider::Anthropic | Provider::OpenAi => 4096,
        })
    }
}

const fn model(
    id: &'static str,
    name: &'static str,
    provider: Provider,
    max_output_tokens: u32,
    max_input_tokens: u32,
) -> ModelInfo {
    ModelInfo {
        id,
        name,
        provider,
        max_output_tokens: Some(max_output_tokens),
        max_input_tokens: Some(max_input_tokens),
    }
}

use Provider::{Anthropic, Gemini, OpenAi};

pub static MODELS: &[ModelInfo] = &[
    // Anthropic
    model("claude-2.0", "Claude 2.0", Anthropic, 4096, 200_000),
    model("claude-2.1", "Claude 2.1", Anthropic, 4096, 200_000),
    model("claude-3-5-haiku-20241022", "Claude 3.5 Haiku", Anthropic, 8192, 200_000),
    model("claude-3-5-haiku-latest", "Claude 3.5 Haiku", Anthropic, 8192, 200_000),
    model("claude-3-5-sonnet-20240620", "Claude 3.5 Sonnet (Old)", Anthropic, 8192, 200_000),
    model("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet (New)", Anthropic, 8192, 200_000),
    model("claude-3-7-sonnet-20250219", "Claude 3.7 Sonnet", Anthropic, 64_000, 200_000),
    model("claude-3-7-sonnet-latest", "Claude 3.7 Sonnet", Anthropic, 64_000, 200_000),
    model("claude-3-haiku-20240307", "Claude 3 Haiku", Anthropic, 4096, 200_000),
    model("claude-3-opus-20240229", "Claude 3 Opus", Anthropic, 4096, 200_000),
    model("claude-3-opus-latest", "Claude 3 Opus", Anthropic, 4096, 200_000),
    model("claude-3-sonnet-20240229", "Claude 3 Sonnet", Anthropic, 4096, 200_000),
    // Gemini
    model("gemini-1.5-flash", "Gemini 1.5 Flash", Gemini, 8192, 1_048_576),
    model("gemini-1.5-flash-8b", "Gemini 1.5 Flash-8B", Gemini, 8192, 1_048_576),
    model("gemini-1.5-pro", "Gemini 1.5 Pro", Gemini, 8192, 2_097_152),
    model("gemini-2.0-flash", "Gemini 2.0 Flash", Gemini, 8192, 1_048_576),
    model("gemini-2.0-flash-001", "Gemini 2.0 Flash", Gemini, 8192, 1_048_576),
    model("gemini-2.0-flash-lite", "Gemini 2.0 Flash-Lite", Gemini, 8192, 1_048_576),
    model("gemini-2.0-pro-exp", "Gemini 2.0 Pro Experimental", Gemini, 65_536, 1_048_576),
    model("gemini-2.5-flash-preview-04-17", "Gemini 2.5 Flash Preview 04-17", Gemini, 65_536, 1_048_576),
    model("gemini-2.5-flash-preview-05-20", "Gemini 2.5 Flash Preview 05-20", Gemini, 65_536, 1_048_576),
    model("gemini-2.5-pro-exp-03-25", "Gemini 2.5 Pro Experimental 03-25", Gemini, 65_536, 1_048_576),
    model("gemini-2.5-pro-preview-03-25", "Gemini 2.5 Pro Preview 03-25", Gemini, 65_536, 1_048_576),
    model("gemini-2.5-pro-preview-05-06", "Gemini 2.5 Pro Preview", Gemini, 65_536, 1_048_576),
    // OpenAI
    model("chatgpt-4o-latest", "ChatGPT-4o", OpenAi, 16_384, 128_000),
    model("gpt-3.5-turbo", "GPT-3.5 Turbo", OpenAi, 4096, 16_385),
    model("gpt-4", "GPT-4", OpenAi, 8192, 8192),
    model("gpt-4-turbo", "GPT-4 Turbo", OpenAi, 4096, 128_000),
    model("gpt-4.1", "GPT-4.1", OpenAi, 32_768, 1_047_576),
    model("gpt-4.1-mini", "GPT-4.1 mini", OpenAi, 32_768, 1_047_576),
    model("gpt-4.1-nano", "GPT-4.1 nano", OpenAi, 32_768, 1_047_576),
    model("gpt-4.5-preview", "GPT-4.5 Preview", OpenAi, 4096, 128_000),
    model("gpt-4o", "GPT-4o", OpenAi, 16_384, 128_000),
    model("gpt-4o-2024-11-20", "GPT-4o 20241120", OpenAi, 16_384, 128_000),
    model("gpt-4o-mini", "GPT-4o mini", OpenAi, 16_384, 128_000),
    model("o1", "o1", OpenAi, 100_000, 200_000),
    model("o1-mini", "o1-mini", OpenAi, 65_536, 128_000),
    model("o1-pro", "o1-pro", OpenAi, 100_000, 200_000),
    model("o3", "o3", OpenAi, 100_000, 200_000),
    model("o3-mini", "o3-mini", OpenAi, 100_000, 200_000),
    model("o4-mini", "o4-mini", OpenAi, 100_000, 200_000),
];

/// Default model for transfers
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}
