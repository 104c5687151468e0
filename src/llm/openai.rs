//! OpenAI Chat Completions API

use serde::Deserialize;
use serde_json::json;

use super::{agent, post_json, Llm, LlmOptions, LlmResponse, TokenUsage};
use crate::error::Result;

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiLlm {
    options: LlmOptions,
    agent: ureq::Agent,
}

impl OpenAiLlm {
    pub fn new(options: LlmOptions) -> Self {
        let agent = agent(options.timeout);
        Self { options, agent }
    }

    fn request_body(&self, prompt: &str, json: bool) -> serde_json::Value {
        json!({
            "model": self.options.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.options.temperature,
            "max_completion_tokens": self.options.max_output_tokens,
            "response_format": { "type": if json { "json_object" } else { "text" } },
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

impl From<ChatResponse> for LlmResponse {
    fn from(response: ChatResponse) -> Self {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let usage = response.usage;
        LlmResponse {
            text,
            usage: TokenUsage::new(usage.prompt_tokens, usage.completion_tokens, usage.total_tokens),
        }
    }
}

impl Llm for OpenAiLlm {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.options.model
    }

    fn complete(&self, prompt: &str, json: bool) -> Result<LlmResponse> {
        let request = self
            .agent
            .post(ENDPOINT)
            .set("Authorization", &format!("Bearer {}", self.options.api_key));

        let response: ChatResponse =
            post_json(request, &self.request_body(prompt, json), self.name())?;
        Ok(response.into())
    }
}
