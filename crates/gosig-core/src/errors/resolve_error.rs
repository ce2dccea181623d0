//! Type resolution errors.
//!
//! Every variant carries the offending file and a 1-based line/column,
//! formatted like a compiler diagnostic.

use std::path::PathBuf;

use super::error_code::{self, GosigErrorCode};

/// Errors raised while resolving the declarations of a Go file.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{path}:{line}:{column}: undefined: {name}")]
    UndefinedType {
        path: PathBuf,
        line: u32,
        column: u32,
        name: String,
    },

    #[error("{path}:{line}:{column}: undefined package qualifier: {qualifier}")]
    UndefinedPackage {
        path: PathBuf,
        line: u32,
        column: u32,
        qualifier: String,
    },

    #[error("{path}:{line}:{column}: {name} is not a type")]
    NotAType {
        path: PathBuf,
        line: u32,
        column: u32,
        name: String,
    },

    #[error("{path}:{line}:{column}: invalid recursive type {name}")]
    InvalidRecursiveType {
        path: PathBuf,
        line: u32,
        column: u32,
        name: String,
    },

    #[error("{path}:{line}:{column}: {name} redeclared in this block")]
    Redeclared {
        path: PathBuf,
        line: u32,
        column: u32,
        name: String,
    },

    #[error("{path}:{line}:{column}: method {receiver}.{name} already declared")]
    DuplicateMethod {
        path: PathBuf,
        line: u32,
        column: u32,
        receiver: String,
        name: String,
    },

    #[error("{path}:{line}:{column}: {name} expects {expected} type argument(s), got {actual}")]
    TypeArgumentCount {
        path: PathBuf,
        line: u32,
        column: u32,
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl GosigErrorCode for ResolveError {
    fn error_code(&self) -> &'static str {
        error_code::RESOLVE_ERROR
    }
}
