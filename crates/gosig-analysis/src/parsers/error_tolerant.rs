//! Locating ERROR and MISSING nodes in a tree-sitter tree.
//!
//! Tree-sitter always produces a tree; a Go file is only accepted when
//! none of these nodes are present.

use tree_sitter::Node;

use super::types::SourcePosition;

/// A syntax problem found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub position: SourcePosition,
    pub message: String,
}

/// Returns the first ERROR or MISSING node in document order.
pub fn first_error(root: Node, source: &[u8]) -> Option<SyntaxIssue> {
    if !root.has_error() {
        return None;
    }
    let mut first: Option<Node> = None;
    collect_errors(root, &mut |node| {
        if first.map_or(true, |f| node.start_byte() < f.start_byte()) {
            first = Some(node);
        }
    });
    first.map(|node| SyntaxIssue {
        position: SourcePosition::from_ts_node(&node),
        message: describe(&node, source),
    })
}

fn collect_errors<'t>(node: Node<'t>, visit: &mut dyn FnMut(Node<'t>)) {
    if node.is_error() || node.is_missing() {
        visit(node);
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, visit);
    }
}

fn describe(node: &Node, source: &[u8]) -> String {
    if node.is_missing() {
        return format!("missing {}", node.kind());
    }
    let text = node.utf8_text(source).unwrap_or("");
    let snippet: String = text.split_whitespace().next().unwrap_or("").chars().take(24).collect();
    if snippet.is_empty() {
        "unexpected input".to_string()
    } else {
        format!("unexpected '{snippet}'")
    }
}
