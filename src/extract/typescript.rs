//! TypeScript, TSX, JavaScript and Haxe rules
//!
//! Haxe has no grammar of its own here. Its class, interface and enum
//! declarations read close enough to TypeScript that the TypeScript grammar
//! recovers them, and the rest of the file ends up in ERROR nodes nobody
//! looks at.

use tree_sitter::Node;

use super::tree::{children, named_sibling_after_keyword, node_text};
use super::NameSet;

const DECLARATIONS: &[(&str, &str)] = &[
    ("class_declaration", "class"),
    ("abstract_class_declaration", "class"),
    ("interface_declaration", "interface"),
    ("enum_declaration", "enum"),
    ("type_alias_declaration", "type"),
];

pub fn collect_types(root: &Node, source: &str) -> Vec<String> {
    let mut names = NameSet::default();
    visit(root, source, &mut names);
    names.into_vec()
}

fn visit(node: &Node, source: &str, names: &mut NameSet) {
    // export class Foo {} -> class Foo {}
    let node = if node.kind() == "export_statement" {
        match node.child_by_field_name("declaration") {
            Some(declaration) => declaration,
            None => *node,
        }
    } else {
        *node
    };

    if let Some((_, keyword)) = DECLARATIONS.iter().find(|(kind, _)| *kind == node.kind()) {
        if let Some(name) = declaration_name(&node, keyword, source) {
            names.insert(&name);
        }
    }

    for child in children(&node) {
        visit(&child, source, names);
    }
}

fn declaration_name(node: &Node, keyword: &str, source: &str) -> Option<String> {
    // type Name<T> = ...
    if node.kind() == "type_alias_declaration" {
        let name = named_sibling_after_keyword(node, keyword)
            .filter(|n| n.kind() == "type_identifier")
            .or_else(|| node.child_by_field_name("name"))?;
        return Some(node_text(&name, source).to_string());
    }

    let name = node
        .child_by_field_name("name")
        .or_else(|| named_sibling_after_keyword(node, keyword))?;
    Some(node_text(&name, source).to_string())
}

#[cfg(test)]
mod tests {
    use crate::extract::{extract_types, ExtractOptions};

    fn types_of(source: &str, path: &str) -> Vec<String> {
        extract_types(source, path, &ExtractOptions::default()).types
    }

    #[test]
    fn test_exported_declarations() {
        let source = r#"
import { Color } from "./Utils";

/** Stores the setup pose and all of the stateless data for a skeleton. */
export class SkeletonData {
	name: string | null = null;
}

export interface Updatable {
	update (physics: Physics): void;
}

export enum Physics { none, reset, update, pose }

export type AttachmentLoaderFactory = (name: string) => object;

export abstract class Attachment {
	abstract copy (): Attachment;
}

class Internal {}
"#;
        assert_eq!(
            types_of(source, "SkeletonData.ts"),
            vec![
                "SkeletonData",
                "Updatable",
                "Physics",
                "AttachmentLoaderFactory",
                "Attachment",
                "Internal"
            ]
        );
    }

    #[test]
    fn test_generic_type_alias_name() {
        let types = types_of("type Map<T> = { [key: string]: T };\n", "Utils.ts");
        assert_eq!(types, vec!["Map"]);
    }

    #[test]
    fn test_tsx_and_javascript() {
        let tsx = "export class SpinePlayer { render () { return <div/>; } }\n";
        assert_eq!(types_of(tsx, "Player.tsx"), vec!["SpinePlayer"]);

        let js = "class AssetManager {\n\tconstructor () {}\n}\nmodule.exports = AssetManager;\n";
        assert_eq!(types_of(js, "AssetManager.js"), vec!["AssetManager"]);
    }
}
