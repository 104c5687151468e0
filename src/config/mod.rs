//! Configuration
//!
//! Project settings loaded from `.docport.config.json`. Every field has a
//! default, so a missing file or a partial one is fine. Command line flags
//! override what is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::DocportError;
use crate::extract::cpp::DEFAULT_EXPORT_MACROS;
use crate::extract::ExtractOptions;
use crate::llm::models::DEFAULT_MODEL;
use crate::matcher::MatchStrategy;
use crate::transfer::{TransferOptions, DEFAULT_MAX_PASSES};

/// Default config file name
pub const CONFIG_FILE: &str = ".docport.config.json";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Model selection and request settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Which files to touch and how hard to try
    #[serde(default)]
    pub transfer: TransferConfig,

    /// C/C++ header handling
    #[serde(default)]
    pub cpp: CppConfig,

    /// Output paths
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if it exists, defaults otherwise. A file that exists but
    /// does not parse is an error.
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DocportError::Config(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            )));
        }
        if self.transfer.max_passes == 0 {
            return Err(DocportError::Config(
                "transfer.maxPasses must be at least 1".to_string(),
            ));
        }
        for pattern in &self.transfer.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                DocportError::Config(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }
        Ok(())
    }

    /// Header extraction settings
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            export_macros: self.cpp.export_macros.clone(),
        }
    }

    /// Transfer settings before command line overrides
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            max_passes: self.transfer.max_passes,
            matcher: self.transfer.matcher,
            extract: self.extract_options(),
        }
    }
}

// ============================================================================
// LLM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    /// Model id, see `docport models`
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token limit; the model's own limit when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============================================================================
// Transfer
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferConfig {
    /// Generate requests allowed per file
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    #[serde(default)]
    pub matcher: MatchStrategy,

    /// Extensions of runtime files to process, with the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns, relative to the runtime directory, to skip
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Where `--debug` writes prompts and answers
    #[serde(default = "default_debug_dir")]
    pub debug_dir: PathBuf,
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

fn default_extensions() -> Vec<String> {
    [
        ".cs", ".cpp", ".c", ".cc", ".h", ".hpp", ".hxx", ".js", ".ts", ".tsx", ".as", ".hx",
    ]
    .iter()
    .map(|e| e.to_string())
    .collect()
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/build/**".to_string(),
        "**/dist/**".to_string(),
        "**/*.d.ts".to_string(),
        "**/.git/**".to_string(),
    ]
}

fn default_debug_dir() -> PathBuf {
    PathBuf::from(".docport/debug")
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
            matcher: MatchStrategy::default(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            debug_dir: default_debug_dir(),
        }
    }
}

// ============================================================================
// C/C++
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CppConfig {
    /// Export macros stripped from headers before parsing
    #[serde(default = "default_export_macros")]
    pub export_macros: Vec<String>,
}

fn default_export_macros() -> Vec<String> {
    DEFAULT_EXPORT_MACROS.iter().map(|m| m.to_string()).collect()
}

impl Default for CppConfig {
    fn default() -> Self {
        Self {
            export_macros: default_export_macros(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Documentation tree written by `extract`
    #[serde(default = "default_javadocs_path")]
    pub javadocs: PathBuf,
}

fn default_javadocs_path() -> PathBuf {
    PathBuf::from("javadocs.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            javadocs: default_javadocs_path(),
        }
    }
}
