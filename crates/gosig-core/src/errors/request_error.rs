//! Request/report payload errors.

use std::path::PathBuf;

use super::error_code::{self, GosigErrorCode};

/// Errors decoding the analysis request or encoding the report.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Malformed request in {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl GosigErrorCode for RequestError {
    fn error_code(&self) -> &'static str {
        error_code::REQUEST_ERROR
    }
}
