//! Source languages
//!
//! The one table that maps a file extension to everything docport needs to
//! know about a target language: how to parse it, what to call it in a
//! prompt, and which documentation style its comments follow.

use std::path::Path;

use serde::{Deserialize, Serialize};

const CSHARP_STYLE: &str = include_str!("../templates/style/csharp.md");
const DOXYGEN_STYLE: &str = include_str!("../templates/style/doxygen.md");
const JSDOC_STYLE: &str = include_str!("../templates/style/jsdoc.md");
const HAXE_STYLE: &str = include_str!("../templates/style/haxe.md");
const FALLBACK_STYLE: &str = "Use appropriate documentation style for this language.";

/// A target language docport can transfer documentation onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    CSharp,
    /// C++ translation unit (`.cpp`, `.cc`)
    Cpp,
    /// C translation unit
    C,
    /// C or C++ header (`.h`, `.hpp`, `.hxx`)
    Header,
    JavaScript,
    TypeScript,
    Tsx,
    ActionScript,
    Haxe,
}

/// Grammar family used to pull type names out of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// tree-sitter-cpp after export-macro stripping
    CppHeader,
    CSharp,
    TypeScript,
    Tsx,
    JavaScript,
}

impl SourceLanguage {
    /// Look up a language by file extension (with or without the leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "cs" => Some(SourceLanguage::CSharp),
            "cpp" | "cc" | "cxx" => Some(SourceLanguage::Cpp),
            "c" => Some(SourceLanguage::C),
            "h" | "hpp" | "hxx" => Some(SourceLanguage::Header),
            "js" | "mjs" => Some(SourceLanguage::JavaScript),
            "ts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "as" => Some(SourceLanguage::ActionScript),
            "hx" => Some(SourceLanguage::Haxe),
            _ => None,
        }
    }

    /// Look up a language from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Grammar used for structural extraction.
    ///
    /// `None` means the file declares nothing docport can match on: C and
    /// C++ translation units keep their declarations in headers, and there
    /// is no ActionScript grammar. Haxe is close enough to TypeScript at the
    /// declaration level to reuse its grammar.
    pub fn grammar(&self) -> Option<Grammar> {
        match self {
            SourceLanguage::Header => Some(Grammar::CppHeader),
            SourceLanguage::CSharp => Some(Grammar::CSharp),
            SourceLanguage::TypeScript | SourceLanguage::Haxe => Some(Grammar::TypeScript),
            SourceLanguage::Tsx => Some(Grammar::Tsx),
            SourceLanguage::JavaScript => Some(Grammar::JavaScript),
            SourceLanguage::Cpp | SourceLanguage::C | SourceLanguage::ActionScript => None,
        }
    }

    /// Human-readable name used in prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceLanguage::CSharp => "C#",
            SourceLanguage::Cpp => "C++",
            SourceLanguage::C => "C",
            SourceLanguage::Header => "C/C++ Header",
            SourceLanguage::JavaScript => "JavaScript",
            SourceLanguage::TypeScript | SourceLanguage::Tsx => "TypeScript",
            SourceLanguage::ActionScript => "ActionScript",
            SourceLanguage::Haxe => "Haxe",
        }
    }

    /// Markdown code-fence identifier
    pub fn fence_id(&self) -> &'static str {
        match self {
            SourceLanguage::CSharp => "csharp",
            SourceLanguage::Cpp | SourceLanguage::Header => "cpp",
            SourceLanguage::C => "c",
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::TypeScript | SourceLanguage::Tsx => "typescript",
            SourceLanguage::ActionScript => "actionscript",
            SourceLanguage::Haxe => "haxe",
        }
    }

    /// Documentation style guide injected into generation and correction prompts
    pub fn doc_style(&self) -> &'static str {
        match self {
            SourceLanguage::CSharp => CSHARP_STYLE,
            SourceLanguage::Cpp | SourceLanguage::C | SourceLanguage::Header => DOXYGEN_STYLE,
            SourceLanguage::JavaScript | SourceLanguage::TypeScript | SourceLanguage::Tsx => {
                JSDOC_STYLE
            }
            SourceLanguage::Haxe => HAXE_STYLE,
            SourceLanguage::ActionScript => FALLBACK_STYLE,
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Grammar {
    /// The tree-sitter language for this grammar family
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Grammar::CppHeader => tree_sitter_cpp::LANGUAGE.into(),
            Grammar::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// Style guide for a path, falling back to the generic instruction
pub fn doc_style_for<P: AsRef<Path>>(path: P) -> &'static str {
    SourceLanguage::from_path(path)
        .map(|lang| lang.doc_style())
        .unwrap_or(FALLBACK_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_dispatch() {
        assert_eq!(SourceLanguage::from_extension(".cs"), Some(SourceLanguage::CSharp));
        assert_eq!(SourceLanguage::from_extension("HPP"), Some(SourceLanguage::Header));
        assert_eq!(SourceLanguage::from_path("a/b/Skeleton.hx"), Some(SourceLanguage::Haxe));
        assert_eq!(SourceLanguage::from_extension("py"), None);
    }

    #[test]
    fn test_translation_units_have_no_grammar() {
        assert_eq!(SourceLanguage::Cpp.grammar(), None);
        assert_eq!(SourceLanguage::C.grammar(), None);
        assert_eq!(SourceLanguage::Header.grammar(), Some(Grammar::CppHeader));
        assert_eq!(SourceLanguage::Haxe.grammar(), Some(Grammar::TypeScript));
    }

    #[test]
    fn test_style_table() {
        assert!(SourceLanguage::CSharp.doc_style().contains("<summary>"));
        assert!(SourceLanguage::Header.doc_style().contains("@brief"));
        assert!(SourceLanguage::TypeScript.doc_style().contains("{@link"));
        assert!(SourceLanguage::Haxe.doc_style().contains("@return"));
        assert_eq!(doc_style_for("Foo.lua"), FALLBACK_STYLE);
    }
}
