//! Error types
//!
//! Library-level failures. Recoverable per-file problems (parse failures,
//! malformed completions, mismatched edits) are logged and absorbed where
//! they happen; only configuration and transport failures travel as `Err`.

use thiserror::Error;

/// Errors produced by the docport library
#[derive(Debug, Error)]
pub enum DocportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported LLM model: {0}")]
    UnsupportedModel(String),

    #[error("No API key provided for {provider}; pass --key or set {env_var}")]
    MissingApiKey { provider: String, env_var: String },

    #[error("{provider} LLM error: {message}")]
    Llm { provider: String, message: String },

    #[error("Template error: {0}")]
    Template(String),
}

impl From<handlebars::RenderError> for DocportError {
    fn from(err: handlebars::RenderError) -> Self {
        DocportError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for DocportError {
    fn from(err: handlebars::TemplateError) -> Self {
        DocportError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocportError>;
