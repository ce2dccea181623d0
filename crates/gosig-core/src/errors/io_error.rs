//! File I/O errors.

use std::path::PathBuf;

use super::error_code::{self, GosigErrorCode};

/// Errors reading request/source files or writing the report.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },
}

impl GosigErrorCode for IoError {
    fn error_code(&self) -> &'static str {
        error_code::IO_ERROR
    }
}
