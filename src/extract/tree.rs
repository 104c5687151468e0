//! Tree navigation helpers shared by the structural and Javadoc extractors

use tree_sitter::Node;

/// Source text covered by a node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Direct children of a node, named and anonymous
pub fn children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// First direct child whose kind is one of `kinds`
pub fn find_child_of_kind<'tree>(node: &Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    children(node).into_iter().find(|c| kinds.contains(&c.kind()))
}

/// All descendants of `node` (excluding `node`) in document order
pub fn descendants<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut out = Vec::new();
    collect_descendants(node, &mut out);
    out
}

fn collect_descendants<'tree>(node: &Node<'tree>, out: &mut Vec<Node<'tree>>) {
    for child in children(node) {
        out.push(child);
        collect_descendants(&child, out);
    }
}

/// Descendants of a given kind, in document order
pub fn descendants_of_kind<'tree>(node: &Node<'tree>, kind: &str) -> Vec<Node<'tree>> {
    descendants(node)
        .into_iter()
        .filter(|n| n.kind() == kind)
        .collect()
}

/// Name node that directly follows a keyword token inside `node`.
///
/// Finds the first descendant token of kind `keyword` and returns its next
/// named sibling, which is where every supported grammar puts the declared
/// name when the `name` field is missing.
pub fn named_sibling_after_keyword<'tree>(node: &Node<'tree>, keyword: &str) -> Option<Node<'tree>> {
    descendants(node)
        .into_iter()
        .find(|n| n.kind() == keyword && !n.is_named())
        .and_then(|kw| kw.next_named_sibling())
}

/// Whether `node` lies inside `ancestor`
pub fn is_descendant_of(node: &Node, ancestor: &Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id() == ancestor.id() {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Parse `source` with `language`, returning `None` when tree-sitter gives up
pub fn parse(language: &tree_sitter::Language, source: &str) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    if let Err(e) = parser.set_language(language) {
        tracing::error!("Failed to set parser language: {}", e);
        return None;
    }
    parser.parse(source, None)
}
