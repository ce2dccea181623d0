//! Go parser using native tree-sitter.
//!
//! Produces a [`ParsedFile`] for a single source file. Anything tree-sitter
//! had to recover from is reported as a syntax error; resolution never sees
//! a partial tree.

use std::path::{Path, PathBuf};
use std::time::Instant;

use gosig_core::errors::ParseError;
use tree_sitter::{Node, Parser, Tree};

use super::error_tolerant;

/// A syntactically valid Go file together with its tree.
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    pub package_name: String,
    pub parse_time_us: u64,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text<'a>(&'a self, node: &Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("package_name", &self.package_name)
            .field("parse_time_us", &self.parse_time_us)
            .finish_non_exhaustive()
    }
}

/// Go parser
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::GrammarUnavailable {
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Parse raw file bytes. The bytes must be UTF-8.
    pub fn parse(&mut self, source: &[u8], path: &Path) -> Result<ParsedFile, ParseError> {
        let source = String::from_utf8(source.to_vec()).map_err(|_| ParseError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;
        self.parse_source(source, path)
    }

    pub fn parse_source(&mut self, source: String, path: &Path) -> Result<ParsedFile, ParseError> {
        let start = Instant::now();

        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let root = tree.root_node();
        if let Some(issue) = error_tolerant::first_error(root, source.as_bytes()) {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: issue.position.line,
                column: issue.position.column,
                message: issue.message,
            });
        }

        let package_name = package_name(&root, source.as_bytes()).ok_or_else(|| {
            ParseError::MissingPackageClause {
                path: path.to_path_buf(),
            }
        })?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            tree,
            package_name,
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}

fn package_name(root: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_clause")?;
    let mut cursor = clause.walk();
    let ident = clause
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")?;
    ident.utf8_text(source).ok().map(str::to_string)
}
