//! Documentation transfer
//!
//! Per target file: extract its type names, map them to Java types, keep the
//! matching documentation, then let the model propose literal edits in a
//! bounded loop:
//!
//! ```text
//! GENERATE --(no effective edits)--> DONE
//!    |
//!    v
//! CORRECT  --(no effective edits)--> DONE
//!    |
//!    +--> GENERATE again, until `max_passes` generate requests were made
//! ```
//!
//! The text is handed to a persistence sink after every pass that changed
//! it, so an interrupted run keeps the last applied pass.

pub mod batch;
pub mod debug;
pub mod edits;
pub mod prompts;
pub mod response;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::{extract_types, ExtractOptions};
use crate::javadoc::JavaType;
use crate::llm::{Llm, TokenUsage};
use crate::matcher::{filter_java_types, MatchStrategy, MinimalJavaType, TypeMapper};

use self::debug::DebugDump;
use self::edits::{apply_edits, is_converged};
use self::prompts::Prompts;
use self::response::parse_edits;

pub use batch::{collect_runtime_files, BatchSummary};
pub use edits::{Edit, EditOutcome};

/// Generate requests allowed per file
pub const DEFAULT_MAX_PASSES: usize = 5;

/// Knobs for a transfer run
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub max_passes: usize,
    pub matcher: MatchStrategy,
    pub extract: ExtractOptions,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            matcher: MatchStrategy::default(),
            extract: ExtractOptions::default(),
        }
    }
}

/// How the edit loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopEnd {
    /// The model had nothing left to change
    Converged,
    /// `max_passes` generate requests were spent
    CapReached,
}

/// Result of the edit loop on one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopOutcome {
    /// Final text
    #[serde(skip)]
    pub code: String,
    /// Generate requests made
    pub passes: usize,
    /// Generate plus correct requests made
    pub requests: usize,
    pub applied: usize,
    pub skipped: usize,
    pub end: LoopEnd,
}

/// What happened to one target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum FileStatus {
    /// No type declarations found
    NoTypes,
    /// The mapping step returned no Java types
    NoMappings,
    /// Mapped names matched nothing in the documentation tree
    NoMatches,
    Documented(LoopOutcome),
    Failed(String),
}

/// Per-file report, usage included even when the file failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: String,
    pub types: Vec<String>,
    pub usage: TokenUsage,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }

    /// Final text, when the edit loop ran
    pub fn code(&self) -> Option<&str> {
        match &self.status {
            FileStatus::Documented(outcome) => Some(&outcome.code),
            _ => None,
        }
    }
}

/// Drives documentation transfer with one model
pub struct Transferer<'a> {
    llm: &'a dyn Llm,
    prompts: Prompts,
    options: TransferOptions,
    debug: Option<DebugDump>,
}

impl<'a> Transferer<'a> {
    pub fn new(llm: &'a dyn Llm, options: TransferOptions) -> Result<Self> {
        Ok(Self {
            llm,
            prompts: Prompts::new()?,
            options,
            debug: None,
        })
    }

    /// Dump every prompt and answer under `dump`'s directory
    pub fn with_debug(mut self, dump: DebugDump) -> Self {
        self.debug = Some(dump);
        self
    }

    /// Model id answering the prompts
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Transfer documentation onto one file on disk.
    ///
    /// The file is rewritten after every pass that changed it, unless
    /// `dry_run` is set. Never fails: errors end up in the report.
    pub fn transfer_file(&self, path: &str, java_types: &[JavaType], dry_run: bool) -> FileReport {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Error processing {}: {}", path, e);
                return FileReport {
                    path: path.to_string(),
                    types: Vec::new(),
                    usage: TokenUsage::default(),
                    status: FileStatus::Failed(e.to_string()),
                };
            }
        };

        let mut write = |code: &str| -> Result<()> {
            if !dry_run {
                std::fs::write(path, code)?;
            }
            Ok(())
        };
        self.transfer_source(&source, path, java_types, &mut write)
    }

    /// Transfer documentation onto `source`, handing each changed text to
    /// `persist`. Never fails: errors end up in the report together with
    /// the tokens spent before them.
    pub fn transfer_source(
        &self,
        source: &str,
        file_path: &str,
        java_types: &[JavaType],
        persist: &mut dyn FnMut(&str) -> Result<()>,
    ) -> FileReport {
        let types = extract_types(source, file_path, &self.options.extract).types;
        let mut usage = TokenUsage::default();

        let status = if types.is_empty() {
            info!("No types found in {}", file_path);
            FileStatus::NoTypes
        } else {
            info!("Found {} types: {}", types.len(), types.join(", "));
            match self.document(source, file_path, &types, java_types, &mut usage, persist) {
                Ok(status) => status,
                Err(e) => {
                    warn!("Error processing {}: {}", file_path, e);
                    FileStatus::Failed(e.to_string())
                }
            }
        };

        FileReport {
            path: file_path.to_string(),
            types,
            usage,
            status,
        }
    }

    fn document(
        &self,
        source: &str,
        file_path: &str,
        types: &[String],
        java_types: &[JavaType],
        usage: &mut TokenUsage,
        persist: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<FileStatus> {
        let mapper = TypeMapper {
            strategy: self.options.matcher,
            llm: self.llm,
            prompts: &self.prompts,
            debug: self.debug.as_ref(),
        };
        let mapping = mapper.map(types, java_types, file_path)?;
        *usage += mapping.usage;

        if mapping.java_types.is_empty() {
            info!("No type mappings found for {}", file_path);
            return Ok(FileStatus::NoMappings);
        }

        let relevant: HashSet<String> = mapping.java_types.into_iter().collect();
        let docs = filter_java_types(java_types, &relevant);
        if docs.is_empty() {
            info!("No Java types matched the mapped types for {}", file_path);
            return Ok(FileStatus::NoMatches);
        }
        debug!("Filtered Java types contains {} types", docs.len());

        let outcome = self.run_edit_loop(source, &docs, file_path, usage, persist)?;
        Ok(FileStatus::Documented(outcome))
    }

    /// The bounded generate/correct loop over `code`.
    ///
    /// Tokens are added to `usage` as each answer arrives, so a failure part
    /// way through still accounts for the requests already made.
    pub fn run_edit_loop(
        &self,
        code: &str,
        docs: &[MinimalJavaType],
        file_path: &str,
        usage: &mut TokenUsage,
        persist: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<LoopOutcome> {
        let mut outcome = LoopOutcome {
            code: code.to_string(),
            passes: 0,
            requests: 0,
            applied: 0,
            skipped: 0,
            end: LoopEnd::Converged,
        };

        outcome.end = loop {
            outcome.passes += 1;
            let pass = outcome.passes;

            // GENERATE
            let prompt = self.prompts.documentation(&outcome.code, docs, file_path)?;
            let edits = self.request_edits(&prompt, file_path, &format!("pass{}.doc", pass), usage)?;
            outcome.requests += 1;
            self.apply(&edits, &mut outcome, persist)?;
            if is_converged(&edits) {
                break LoopEnd::Converged;
            }

            // CORRECT
            let prompt = self.prompts.correction(&outcome.code, file_path)?;
            let corrections =
                self.request_edits(&prompt, file_path, &format!("pass{}.correction", pass), usage)?;
            outcome.requests += 1;
            self.apply(&corrections, &mut outcome, persist)?;
            if is_converged(&corrections) {
                break LoopEnd::Converged;
            }

            if pass >= self.options.max_passes {
                warn!("Stopping {} after {} passes", file_path, pass);
                break LoopEnd::CapReached;
            }
        };

        info!(
            "Applied {} edits to {} in {} passes",
            outcome.applied, file_path, outcome.passes
        );
        Ok(outcome)
    }

    fn request_edits(
        &self,
        prompt: &str,
        file_path: &str,
        label: &str,
        usage: &mut TokenUsage,
    ) -> Result<Vec<Edit>> {
        if let Some(dump) = &self.debug {
            dump.write(file_path, &format!("{}-prompt", label), prompt);
        }

        let response = self.llm.complete(prompt, false)?;
        *usage += response.usage;
        debug!("Tokens used: {}", response.usage);

        if let Some(dump) = &self.debug {
            dump.write(file_path, &format!("{}-response", label), &response.text);
        }
        Ok(parse_edits(&response.text))
    }

    fn apply(
        &self,
        edits: &[Edit],
        outcome: &mut LoopOutcome,
        persist: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        let EditOutcome {
            code,
            applied,
            skipped,
        } = apply_edits(edits, &outcome.code);
        outcome.applied += applied;
        outcome.skipped += skipped;

        if applied > 0 {
            outcome.code = code;
            persist(&outcome.code)?;
        }
        Ok(())
    }
}
