//! Source structural extraction
//!
//! Parses one target-language file and lists the type names it declares
//! (classes, interfaces, enums, structs, unions, type aliases). The list is
//! what the matcher correlates against the Java documentation tree, so it
//! favours recall on real-world headers full of export macros over strict
//! grammar correctness.
//!
//! Dispatch is by extension through [`SourceLanguage`]; each grammar family
//! has its own traversal rules module.

pub mod cpp;
pub mod csharp;
pub mod tree;
pub mod typescript;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::language::{Grammar, SourceLanguage};

/// Type names declared in one target file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub file: String,
    pub types: Vec<String>,
}

impl TypeInfo {
    pub fn empty(file: &str) -> Self {
        Self {
            file: file.to_string(),
            types: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Knobs for structural extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Export/visibility macros deleted from headers before parsing
    pub export_macros: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            export_macros: cpp::DEFAULT_EXPORT_MACROS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Order-preserving set of type names
#[derive(Debug, Default)]
pub(crate) struct NameSet {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl NameSet {
    pub(crate) fn insert(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.names
    }
}

/// Extract the declared type names from a single file's source text.
///
/// `file_path` only selects the grammar. Unsupported extensions, C/C++
/// translation units and unparseable input all yield an empty result.
pub fn extract_types(source: &str, file_path: &str, options: &ExtractOptions) -> TypeInfo {
    let Some(language) = SourceLanguage::from_path(file_path) else {
        return TypeInfo::empty(file_path);
    };
    let Some(grammar) = language.grammar() else {
        return TypeInfo::empty(file_path);
    };

    let cleaned;
    let text = if grammar == Grammar::CppHeader {
        cleaned = cpp::strip_export_macros(source, &options.export_macros);
        cleaned.as_str()
    } else {
        source
    };

    let Some(tree) = tree::parse(&grammar.tree_sitter_language(), text) else {
        warn!("Error parsing {}: parser returned no tree", file_path);
        return TypeInfo::empty(file_path);
    };
    let root = tree.root_node();

    let types = match grammar {
        Grammar::CppHeader => cpp::collect_types(&root, text),
        Grammar::CSharp => csharp::collect_types(&root, text),
        Grammar::TypeScript | Grammar::Tsx | Grammar::JavaScript => {
            typescript::collect_types(&root, text)
        }
    };

    debug!("Extracted {} types from {}", types.len(), file_path);
    TypeInfo {
        file: file_path.to_string(),
        types,
    }
}

/// Extract type names from every supported file under `root`.
///
/// Unreadable files are logged and skipped.
pub fn extract_types_from_dir<P: AsRef<Path>>(root: P, options: &ExtractOptions) -> Vec<TypeInfo> {
    let mut results = Vec::new();

    for entry in WalkDir::new(root.as_ref())
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let supported = SourceLanguage::from_path(path)
            .and_then(|lang| lang.grammar())
            .is_some();
        if !supported {
            continue;
        }

        let file_path = path.to_string_lossy().to_string();
        match std::fs::read_to_string(path) {
            Ok(source) => results.push(extract_types(&source, &file_path, options)),
            Err(e) => warn!("Error processing file {}: {}", file_path, e),
        }
    }

    results
}
