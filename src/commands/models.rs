//! Models Command
//!
//! Implements `docport models`: list the supported models.

use anyhow::Result;
use console::style;

use crate::llm::models::{Provider, DEFAULT_MODEL, MODELS};

/// Execute the models command
pub fn execute_models() -> Result<()> {
    for provider in [Provider::Anthropic, Provider::OpenAi, Provider::Gemini] {
        println!(
            "{} {}",
            style(provider.display_name()).bold(),
            style(format!("(${})", provider.env_var())).dim()
        );
        for info in MODELS.iter().filter(|m| m.provider == provider) {
            let marker = if info.id == DEFAULT_MODEL { " (default)" } else { "" };
            println!(
                "  {:<32} {}  max output {}{}",
                info.id,
                info.name,
                info.default_max_output_tokens(),
                style(marker).green()
            );
        }
        println!();
    }
    Ok(())
}
