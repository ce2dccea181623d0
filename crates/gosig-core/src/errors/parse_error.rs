//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, GosigErrorCode};

/// Errors that can occur while parsing a Go source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Go grammar unavailable: {message}")]
    GrammarUnavailable { message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("{path}:{line}:{column}: syntax error: {message}")]
    Syntax {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    #[error("{path}: expected 'package' clause")]
    MissingPackageClause { path: PathBuf },

    #[error("{path}: source is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },
}

impl GosigErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
