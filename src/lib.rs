#![forbid(unsafe_code)]

//! # docport
//!
//! Ports Javadoc from a Java source tree onto hand-written runtimes in other
//! languages.
//!
//! ## Pipeline
//!
//! - **Javadoc extraction**: a tree-sitter walk of the Java sources builds a
//!   tree of documented types, members and enum constants
//! - **Type extraction**: each target file (C#, C/C++ headers, TypeScript,
//!   JavaScript, Haxe) yields the type names it declares
//! - **Matching**: target types are mapped to Java types, by model or by name
//! - **Transfer**: the model proposes literal edits that insert comments;
//!   a bounded generate/correct loop applies them
//!
//! ## Example
//!
//! ```rust,no_run
//! use docport::{create_llm, extract_javadocs_from_dir, Config, Transferer};
//! use std::time::Duration;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let java_types = extract_javadocs_from_dir("spine-libgdx/src");
//!
//!     let llm = create_llm(&config.llm.model, None, 0.7, None, Duration::from_secs(600))?;
//!     let transferer = Transferer::new(llm.as_ref(), config.transfer_options())?;
//!
//!     let report = transferer.transfer_file("spine-csharp/src/Bone.cs", &java_types, false);
//!     println!("{:?}", report.status);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod javadoc;
pub mod language;
pub mod llm;
pub mod matcher;
pub mod transfer;

// Re-exports
pub use config::Config;
pub use error::{DocportError, Result};
pub use extract::{extract_types, extract_types_from_dir, ExtractOptions, TypeInfo};
pub use javadoc::{
    extract_javadocs_from_dir, load_javadocs, save_javadocs, JavaEnumConstant, JavaMember,
    JavaType, JavaTypeKind,
};
pub use language::{Grammar, SourceLanguage};
pub use llm::{create_llm, Llm, LlmResponse, TokenUsage};
pub use matcher::{filter_java_types, MatchStrategy, MinimalJavaType, TypeMapper};
pub use transfer::{
    BatchSummary, Edit, FileReport, FileStatus, LoopEnd, LoopOutcome, TransferOptions, Transferer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
