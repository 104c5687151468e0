//! Google Gemini `generateContent` API

use serde::Deserialize;
use serde_json::json;

use super::{agent, estimate_tokens, post_json, Llm, LlmOptions, LlmResponse, TokenUsage};
use crate::error::Result;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiLlm {
    options: LlmOptions,
    agent: ureq::Agent,
}

impl GeminiLlm {
    pub fn new(options: LlmOptions) -> Self {
        let agent = agent(options.timeout);
        Self { options, agent }
    }

    fn request_body(&self, prompt: &str, json: bool) -> serde_json::Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.options.temperature,
                "maxOutputTokens": self.options.max_output_tokens,
                "responseMimeType": if json { "application/json" } else { "text/plain" },
            },
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    total_token_count: u64,
}

impl GenerateResponse {
    fn into_response(self, prompt: &str) -> LlmResponse {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        let usage = match self.usage_metadata {
            Some(meta) => TokenUsage::new(
                meta.prompt_token_count,
                meta.candidates_token_count,
                meta.total_token_count,
            ),
            None => {
                let input = estimate_tokens(prompt);
                let output = estimate_tokens(&text);
                TokenUsage::new(input, output, input + output)
            }
        };

        LlmResponse { text, usage }
    }
}

impl Llm for GeminiLlm {
    fn name(&self) -> &str {
        "Google Gemini"
    }

    fn model(&self) -> &str {
        &self.options.model
    }

    fn complete(&self, prompt: &str, json: bool) -> Result<LlmResponse> {
        let url = format!("{}/{}:generateContent", BASE_URL, self.options.model);
        let request = self.agent.post(&url).query("key", &self.options.api_key);

        let response: GenerateResponse =
            post_json(request, &self.request_body(prompt, json), self.name())?;
        Ok(response.into_response(prompt))
    }
}
