//! Batch-level error aggregate.

use super::error_code::GosigErrorCode;
use super::{ConfigError, IoError, ParseError, RequestError, ResolveError};

/// Any failure that aborts a batch run.
/// Aggregates subsystem errors via `From` conversions; there is no
/// partial-result mode, so the first error ends the run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GosigErrorCode for BatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(e) => e.error_code(),
            Self::Request(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Resolve(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
