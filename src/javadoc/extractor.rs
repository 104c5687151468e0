//! Java source to documentation tree

use tracing::warn;
use tree_sitter::Node;

use super::{JavaEnumConstant, JavaMember, JavaType, JavaTypeKind};
use crate::extract::tree::{children, descendants_of_kind, find_child_of_kind, node_text, parse};

const BODY_KINDS: &[&str] = &["class_body", "interface_body", "enum_body"];

/// Parse one Java file into its top-level documented types.
///
/// A file tree-sitter cannot parse at all is logged and yields nothing.
pub fn extract_java_types(source: &str, source_path: &str) -> Vec<JavaType> {
    let Some(tree) = parse(&tree_sitter_java::LANGUAGE.into(), source) else {
        warn!("Error parsing file: {}", source_path);
        return Vec::new();
    };
    let root = tree.root_node();

    let ctx = Context {
        source,
        source_path,
        package_name: package_name(&root, source),
    };

    children(&root)
        .iter()
        .filter_map(|node| ctx.extract_type(node, None))
        .collect()
}

/// `package a.b.c;` -> `a.b.c`, or empty
fn package_name(root: &Node, source: &str) -> String {
    let Some(decl) = find_child_of_kind(root, &["package_declaration"]) else {
        return String::new();
    };
    match find_child_of_kind(&decl, &["scoped_identifier", "identifier"]) {
        Some(name) => node_text(&name, source).to_string(),
        None => node_text(&decl, source)
            .trim_start_matches("package")
            .trim_end_matches(';')
            .trim()
            .to_string(),
    }
}

/// Verbatim Javadoc of the comment right before `node`, or empty.
///
/// Only the nearest preceding named sibling counts, and only if it is a
/// `/**` block comment.
fn javadoc_of(node: &Node, source: &str) -> String {
    match node.prev_named_sibling() {
        Some(prev) if prev.kind() == "block_comment" => {
            let text = node_text(&prev, source);
            if text.starts_with("/**") {
                text.to_string()
            } else {
                String::new()
            }
        }
        _ => String::new(),
    }
}

/// Declaration text before its body, without the trailing `{` or `;`
fn text_before_body(node: &Node, source: &str) -> String {
    let text = node_text(node, source);
    let cut = node
        .child_by_field_name("body")
        .map(|body| body.start_byte() - node.start_byte())
        .unwrap_or(text.len());
    text.get(..cut)
        .unwrap_or(text)
        .trim()
        .trim_end_matches(['{', ';'])
        .trim()
        .to_string()
}

struct Context<'a> {
    source: &'a str,
    source_path: &'a str,
    package_name: String,
}

impl Context<'_> {
    fn text(&self, node: &Node) -> String {
        node_text(node, self.source).to_string()
    }

    fn extract_type(&self, node: &Node, parent_full_name: Option<&str>) -> Option<JavaType> {
        let kind = JavaTypeKind::from_node_kind(node.kind())?;
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| descendants_of_kind(node, "identifier").into_iter().next())?;
        let simple_name = self.text(&name_node);

        let full_name = match parent_full_name {
            Some(parent) => format!("{}.{}", parent, simple_name),
            None if self.package_name.is_empty() => simple_name.clone(),
            None => format!("{}.{}", self.package_name, simple_name),
        };

        let mut java_type = JavaType {
            simple_name,
            full_name,
            package_name: self.package_name.clone(),
            kind,
            javadoc: javadoc_of(node, self.source),
            members: Vec::new(),
            enum_constants: None,
            nested_types: Vec::new(),
            source_path: self.source_path.to_string(),
        };

        if kind == JavaTypeKind::Enum {
            java_type.enum_constants = Some(Vec::new());
        }

        let body = node
            .child_by_field_name("body")
            .or_else(|| find_child_of_kind(node, BODY_KINDS));
        if let Some(body) = body {
            // enum members live after the constant list
            let mut scopes = vec![body];
            if let Some(decls) = find_child_of_kind(&body, &["enum_body_declarations"]) {
                scopes.push(decls);
            }

            for scope in &scopes {
                for child in children(scope) {
                    if let Some(member) = self.extract_member(&child) {
                        java_type.members.push(member);
                    } else if let Some(nested) =
                        self.extract_type(&child, Some(java_type.full_name.as_str()))
                    {
                        java_type.nested_types.push(nested);
                    }
                }
            }

            if let Some(constants) = java_type.enum_constants.as_mut() {
                constants.extend(
                    children(&body)
                        .iter()
                        .filter(|c| c.kind() == "enum_constant")
                        .filter_map(|c| self.extract_enum_constant(c)),
                );
            }
        }

        Some(java_type)
    }

    fn extract_member(&self, node: &Node) -> Option<JavaMember> {
        if !matches!(
            node.kind(),
            "field_declaration" | "constant_declaration" | "method_declaration" | "constructor_declaration"
        ) {
            return None;
        }

        let javadoc = javadoc_of(node, self.source);
        if javadoc.is_empty() {
            return None;
        }

        let signature = self.signature(node);
        if signature.is_empty() {
            return None;
        }
        Some(JavaMember { signature, javadoc })
    }

    fn signature(&self, node: &Node) -> String {
        let field = |name: &str| node.child_by_field_name(name).map(|n| self.text(&n));

        let structured = match node.kind() {
            "field_declaration" | "constant_declaration" => {
                let name = node
                    .child_by_field_name("declarator")
                    .and_then(|d| d.child_by_field_name("name"))
                    .map(|n| self.text(&n));
                match (field("type"), name) {
                    (Some(ty), Some(name)) => Some(format!("{} {}", ty, name)),
                    _ => None,
                }
            }
            "method_declaration" => match (field("type"), field("name"), field("parameters")) {
                (Some(ty), Some(name), Some(params)) => Some(format!("{} {}{}", ty, name, params)),
                _ => None,
            },
            "constructor_declaration" => match (field("name"), field("parameters")) {
                (Some(name), Some(params)) => Some(format!("{}{}", name, params)),
                _ => None,
            },
            _ => None,
        };

        structured.unwrap_or_else(|| text_before_body(node, self.source))
    }

    fn extract_enum_constant(&self, node: &Node) -> Option<JavaEnumConstant> {
        let javadoc = javadoc_of(node, self.source);
        if javadoc.is_empty() {
            return None;
        }
        let name = match node.child_by_field_name("name") {
            Some(name) => self.text(&name),
            None => self.text(node).trim_end_matches(',').trim().to_string(),
        };
        Some(JavaEnumConstant { name, javadoc })
    }
}
