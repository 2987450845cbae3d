//! Helper functions for tree-sitter AST navigation.

use tree_sitter::Node;

use crate::model::Location;

/// Get the text content of a node.
pub fn get_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    if start < source.len() && end <= source.len() && start < end {
        &source[start..end]
    } else {
        ""
    }
}

/// Find the first child of a specific type.
#[allow(clippy::manual_find)]
pub fn find_child_by_type<'a>(node: &Node<'a>, type_name: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == type_name {
            return Some(child);
        }
    }
    None
}

/// Find all children of a specific type.
pub fn find_children_by_type<'a>(node: &Node<'a>, type_name: &str) -> Vec<Node<'a>> {
    let mut results = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == type_name {
            results.push(child);
        }
    }
    results
}

/// Check if a node has a child of a specific type.
pub fn has_child_of_type(node: &Node, type_name: &str) -> bool {
    find_child_by_type(node, type_name).is_some()
}

/// The declared name: the `name` field, else the first identifier child.
pub fn get_name<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name("name")
        .or_else(|| find_child_by_type(node, "identifier"))
        .map(|n| get_node_text(&n, source))
}

/// Text with runs of whitespace collapsed to one space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Start position of a node (1-indexed line and column).
pub fn get_location(node: &Node, file_path: &str) -> Location {
    let position = node.start_position();
    Location::new(file_path, position.row as u32 + 1, position.column as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Dictionary<string,\n    int>"), "Dictionary<string, int>");
        assert_eq!(normalize_text("  int  "), "int");
        assert_eq!(normalize_text(""), "");
    }
}
