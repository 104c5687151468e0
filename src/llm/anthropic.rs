//! Anthropic Messages API

use serde::Deserialize;
use serde_json::json;

use super::{agent, post_json, Llm, LlmOptions, LlmResponse, TokenUsage};
use crate::error::Result;

const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const JSON_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that responds in JSON format only. No other text should be included.";

pub struct AnthropicLlm {
    options: LlmOptions,
    agent: ureq::Agent,
}

impl AnthropicLlm {
    pub fn new(options: LlmOptions) -> Self {
        let agent = agent(options.timeout);
        Self { options, agent }
    }

    fn request_body(&self, prompt: &str, json: bool) -> serde_json::Value {
        json!({
            "model": self.options.model,
            "max_tokens": self.options.max_output_tokens,
            "temperature": self.options.temperature,
            "system": if json { JSON_SYSTEM_PROMPT } else { SYSTEM_PROMPT },
            "messages": [{ "role": "user", "content": prompt }],
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl From<MessagesResponse> for LlmResponse {
    fn from(response: MessagesResponse) -> Self {
        let text = response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect::<String>();
        let usage = response.usage;
        LlmResponse {
            text,
            usage: TokenUsage::new(
                usage.input_tokens,
                usage.output_tokens,
                usage.input_tokens + usage.output_tokens,
            ),
        }
    }
}

impl Llm for AnthropicLlm {
    fn name(&self) -> &str {
        "Anthropic"
    }

    fn model(&self) -> &str {
        &self.options.model
    }

    fn complete(&self, prompt: &str, json: bool) -> Result<LlmResponse> {
        let request = self
            .agent
            .post(ENDPOINT)
            .set("x-api-key", &self.options.api_key)
            .set("anthropic-version", API_VERSION)
            .set("content-type", "application/json");

        let response: MessagesResponse =
            post_json(request, &self.request_body(prompt, json), self.name())?;
        Ok(response.into())
    }
}
