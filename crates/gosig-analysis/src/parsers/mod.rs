//! Tree-sitter parser subsystem for Go sources.

pub mod error_tolerant;
pub mod go;
pub mod types;

pub use go::{GoParser, ParsedFile};
pub use types::SourcePosition;
