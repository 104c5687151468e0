//! C# rules
//!
//! Namespaces (block and file-scoped) are walked through but never reported.

use tree_sitter::Node;

use super::tree::{children, descendants_of_kind, named_sibling_after_keyword, node_text};
use super::NameSet;

/// Declaration kinds reported as types, with the keyword that precedes the name
const DECLARATIONS: &[(&str, &str)] = &[
    ("class_declaration", "class"),
    ("interface_declaration", "interface"),
    ("enum_declaration", "enum"),
    ("struct_declaration", "struct"),
];

pub fn collect_types(root: &Node, source: &str) -> Vec<String> {
    let mut names = NameSet::default();
    visit(root, source, &mut names);
    names.into_vec()
}

fn visit(node: &Node, source: &str, names: &mut NameSet) {
    if let Some((_, keyword)) = DECLARATIONS.iter().find(|(kind, _)| *kind == node.kind()) {
        if let Some(name) = declaration_name(node, keyword, source) {
            names.insert(&name);
        }
    }

    for child in children(node) {
        visit(&child, source, names);
    }
}

fn declaration_name(node: &Node, keyword: &str, source: &str) -> Option<String> {
    let name = node
        .child_by_field_name("name")
        .or_else(|| named_sibling_after_keyword(node, keyword))
        .or_else(|| descendants_of_kind(node, "identifier").into_iter().next())?;
    Some(node_text(&name, source).to_string())
}
