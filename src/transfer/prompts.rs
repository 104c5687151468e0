//! The three prompts sent per target file
//!
//! Templates live in `templates/prompts/` and are compiled into the binary.
//! Rendering never HTML-escapes: prompts carry source code verbatim.

use std::path::Path;

use handlebars::Handlebars;
use serde_json::json;

use crate::error::Result;
use crate::language::{doc_style_for, SourceLanguage};
use crate::matcher::{MinimalJavaType, TypeSummary};

const TYPE_MAPPING: &str = "type_mapping";
const DOCUMENTATION: &str = "documentation";
const CORRECTION: &str = "correction";

/// Compiled prompt templates
pub struct Prompts {
    registry: Handlebars<'static>,
}

/// Language details of a target file as the prompts present them
struct Target {
    language: &'static str,
    fence: &'static str,
    style_guide: &'static str,
    file_name: String,
}

impl Target {
    fn of(file_path: &str) -> Self {
        let language = SourceLanguage::from_path(file_path);
        Self {
            language: language.map(|l| l.display_name()).unwrap_or("Unknown"),
            fence: language.map(|l| l.fence_id()).unwrap_or(""),
            style_guide: doc_style_for(file_path).trim(),
            file_name: Path::new(file_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file_path.to_string()),
        }
    }
}

impl Prompts {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        registry.register_template_string(
            TYPE_MAPPING,
            include_str!("../../templates/prompts/type_mapping.hbs"),
        )?;
        registry.register_template_string(
            DOCUMENTATION,
            include_str!("../../templates/prompts/documentation.hbs"),
        )?;
        registry.register_template_string(
            CORRECTION,
            include_str!("../../templates/prompts/correction.hbs"),
        )?;
        Ok(Self { registry })
    }

    /// Ask which Java types correspond to the types declared in a file
    pub fn type_mapping(
        &self,
        source_types: &[String],
        summary: &[TypeSummary],
        file_path: &str,
    ) -> Result<String> {
        let target = Target::of(file_path);
        let data = json!({
            "language": target.language,
            "file_name": target.file_name,
            "source_types": source_types.join("\n"),
            "summary_json": serde_json::to_string_pretty(summary)?,
        });
        Ok(self.registry.render(TYPE_MAPPING, &data)?)
    }

    /// Ask for documentation edits to a file given its matched Java docs
    pub fn documentation(
        &self,
        source_code: &str,
        java_types: &[MinimalJavaType],
        file_path: &str,
    ) -> Result<String> {
        let target = Target::of(file_path);
        let data = json!({
            "language": target.language,
            "file_name": target.file_name,
            "fence": target.fence,
            "source_code": source_code,
            "java_docs_json": serde_json::to_string_pretty(java_types)?,
            "style_guide": target.style_guide,
        });
        Ok(self.registry.render(DOCUMENTATION, &data)?)
    }

    /// Ask for fixes to broken or duplicated comments only
    pub fn correction(&self, source_code: &str, file_path: &str) -> Result<String> {
        let target = Target::of(file_path);
        let data = json!({
            "language": target.language,
            "fence": target.fence,
            "source_code": source_code,
            "style_guide": target.style_guide,
        });
        Ok(self.registry.render(CORRECTION, &data)?)
    }
}
