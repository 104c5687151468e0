//! C/C++ header rules
//!
//! Headers in ported runtimes decorate their classes with export macros
//! (`class SP_API Skeleton : public SpineObject`). tree-sitter-cpp reads the
//! macro as the class name and the real name as a stray declarator, so the
//! text is normalised before parsing and the tree walk keeps a couple of
//! fallbacks for what the normalisation misses.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use tree_sitter::Node;

use super::tree::{children, descendants, descendants_of_kind, is_descendant_of, node_text};
use super::NameSet;

/// Export macros stripped when no project configuration says otherwise
pub const DEFAULT_EXPORT_MACROS: &[&str] = &["SP_API", "SPINE_API", "EXPORT"];

// ============================================================================
// Macro normalisation
// ============================================================================

// class MACRO Name -> class Name
static CLASS_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+\w+\s+(\w+)").unwrap());

// struct MACRO Name -> struct Name
static STRUCT_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"struct\s+\w+\s+(\w+)").unwrap());

// class MACRO Name : public A, ... -> class Name : public A, ...
static CLASS_MACRO_BASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"class\s+\w+\s+(\w+)\s*:\s*(public|private|protected)\s+([^,{]+),").unwrap()
});

// , MACRO public Base -> , public Base
static BASE_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*\w+\s+(public|private|protected)\s+(\w+)").unwrap()
});

/// Remove export macros and collapse `class/struct MACRO Name` into
/// `class/struct Name`.
///
/// The collapsing patterns are deliberately loose. They also rewrite
/// things like `struct timeval tv` inside comments or bodies, which costs
/// nothing since only type names are read from the result.
pub fn strip_export_macros(source: &str, macros: &[String]) -> String {
    let mut processed = source.to_string();

    for name in macros {
        let pattern = format!(r"\b{}\b", regex::escape(name));
        match Regex::new(&pattern) {
            Ok(re) => processed = re.replace_all(&processed, "").into_owned(),
            Err(e) => warn!("Skipping export macro {:?}: {}", name, e),
        }
    }

    processed = CLASS_MACRO.replace_all(&processed, "class ${1}").into_owned();
    processed = STRUCT_MACRO.replace_all(&processed, "struct ${1}").into_owned();
    processed = CLASS_MACRO_BASES
        .replace_all(&processed, "class ${1} : ${2} ${3},")
        .into_owned();
    processed = BASE_MACRO.replace_all(&processed, ", ${1} ${2}").into_owned();

    processed
}

// ============================================================================
// Tree walk
// ============================================================================

const SPECIFIERS: &[&str] = &[
    "class_specifier",
    "struct_specifier",
    "enum_specifier",
    "union_specifier",
];

/// Collect every class/struct/enum/union definition and typedef name under
/// `root`, in document order.
pub fn collect_types(root: &Node, source: &str) -> Vec<String> {
    let mut names = NameSet::default();
    visit(root, source, &mut names);
    names.into_vec()
}

fn visit(node: &Node, source: &str, names: &mut NameSet) {
    match node.kind() {
        // `friend class X;` names a type declared elsewhere
        "friend_declaration" => return,
        kind if SPECIFIERS.contains(&kind) => {
            if node.child_by_field_name("body").is_some() {
                if let Some(name) = specifier_name(node, source) {
                    names.insert(&name);
                }
            }
        }
        "function_definition" => {
            if let Some(name) = macro_class_name(node, source) {
                names.insert(&name);
            }
        }
        "typedef_declaration" | "type_definition" => {
            if let Some(name) = typedef_name(node, source) {
                names.insert(&name);
            }
        }
        _ => {}
    }

    for child in children(node) {
        visit(&child, source, names);
    }
}

/// Name of a specifier that has a body.
///
/// Uses the `name` field, otherwise the first identifier token between the
/// keyword and the inheritance colon or body, whichever comes first.
fn specifier_name(node: &Node, source: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        let text = node_text(&name, source);
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    let keyword_end = children(node)
        .into_iter()
        .find(|c| !c.is_named() && matches!(c.kind(), "class" | "struct" | "enum" | "union"))
        .map(|kw| kw.end_byte())?;

    let mut limit = node
        .child_by_field_name("body")
        .map(|b| b.start_byte())
        .unwrap_or_else(|| node.end_byte());
    if let Some(colon) = descendants(node)
        .into_iter()
        .find(|n| n.kind() == ":" && n.start_byte() >= keyword_end)
    {
        limit = limit.min(colon.start_byte());
    }

    descendants(node)
        .into_iter()
        .filter(|n| matches!(n.kind(), "identifier" | "type_identifier"))
        .find(|n| n.start_byte() >= keyword_end && n.end_byte() <= limit)
        .map(|n| node_text(&n, source).to_string())
}

/// `class MACRO Name { ... }` with an unknown macro parses as a function
/// definition whose return type is a bodiless `class MACRO` specifier and
/// whose declarator is the real class name.
fn macro_class_name(node: &Node, source: &str) -> Option<String> {
    let first = node.child(0)?;
    if !matches!(first.kind(), "class_specifier" | "struct_specifier")
        || first.child_by_field_name("body").is_some()
    {
        return None;
    }

    if let Some(second) = node.child(1) {
        if second.kind() == "identifier" {
            return Some(node_text(&second, source).to_string());
        }
        // often an ERROR node wrapping the name
        if let Some(id) = descendants_of_kind(&second, "identifier").into_iter().next() {
            return Some(node_text(&id, source).to_string());
        }
    }

    descendants_of_kind(node, "identifier")
        .into_iter()
        .find(|id| !is_descendant_of(id, &first))
        .map(|id| node_text(&id, source).to_string())
}

/// The new name introduced by a typedef: the last type identifier, or the
/// last plain identifier when there is none.
fn typedef_name(node: &Node, source: &str) -> Option<String> {
    descendants_of_kind(node, "type_identifier")
        .into_iter()
        .last()
        .or_else(|| descendants_of_kind(node, "identifier").into_iter().last())
        .map(|n| node_text(&n, source).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_types, ExtractOptions};

    const ANIMATION_STATE_H: &str = r#"
#ifndef Spine_AnimationState_h
#define Spine_AnimationState_h

#include <spine/SpineObject.h>

namespace spine {
	enum EventType {
		EventType_Start = 0,
		EventType_Interrupt,
		EventType_End
	};

	class SP_API Animation;

	class SP_API TrackEntry : public SpineObject, public HasRendererObject {
		friend class EventQueue;

	public:
		TrackEntry();

		virtual ~TrackEntry();

		int getTrackIndex();

	private:
		int _trackIndex;
	};

	class SP_API EventQueueEntry : public SpineObject {
	public:
		EventType _type;
	};

	class SP_API EventQueue : public SpineObject {
	private:
		int _drainDisabled;
	};

	class SP_API AnimationState : public SpineObject, public HasRendererObject {
	public:
		explicit AnimationState(int data);
	};

	typedef struct {
		float r, g, b, a;
	} spColor;
}

#endif
"#;

    fn types_of(source: &str) -> Vec<String> {
        extract_types(source, "AnimationState.h", &ExtractOptions::default()).types
    }

    #[test]
    fn test_header_types_in_document_order() {
        assert_eq!(
            types_of(ANIMATION_STATE_H),
            vec![
                "EventType",
                "TrackEntry",
                "EventQueueEntry",
                "EventQueue",
                "AnimationState",
                "spColor"
            ]
        );
    }

    #[test]
    fn test_forward_declarations_and_friends_are_ignored() {
        let types = types_of(ANIMATION_STATE_H);
        assert!(!types.contains(&"Animation".to_string()));

        let types = types_of("class Foo;\nstruct Bar;\n");
        assert!(types.is_empty());
    }

    #[test]
    fn test_unknown_macro_before_class_name() {
        let types = types_of("class API_MACRO Foo : public Base {\npublic:\n\tint x;\n};\n");
        assert_eq!(types, vec!["Foo"]);
    }

    #[test]
    fn test_strip_configured_macros() {
        let macros = vec!["MY_EXPORT".to_string()];
        let stripped = strip_export_macros("class MY_EXPORT Skeleton {};", &macros);
        assert_eq!(stripped, "class  Skeleton {};");

        // words containing the macro are left alone
        let stripped = strip_export_macros("int MY_EXPORTER = 1;", &macros);
        assert_eq!(stripped, "int MY_EXPORTER = 1;");
    }

    #[test]
    fn test_collapse_macro_in_base_list() {
        let stripped = strip_export_macros("class A : public B, DLL public C {", &[]);
        assert_eq!(stripped, "class A : public B, public C {");
    }

    #[test]
    fn test_typedef_takes_last_type_identifier() {
        let types = types_of("typedef struct spBone {\n\tint x;\n} spBone;\ntypedef unsigned int spIndex;\n");
        assert_eq!(types, vec!["spBone", "spIndex"]);
    }
}
