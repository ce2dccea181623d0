//! Source positions shared by the parser and the resolver.

use tree_sitter::Node;

/// Position of a declaration in its source file.
///
/// Ordering is by byte offset, i.e. textual order in the file. Line and
/// column are 1-based and only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourcePosition {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn from_ts_node(node: &Node) -> Self {
        let point = node.start_position();
        Self {
            offset: node.start_byte(),
            line: point.row as u32 + 1,
            column: point.column as u32 + 1,
        }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
