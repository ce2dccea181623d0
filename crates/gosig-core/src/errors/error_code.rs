//! GosigErrorCode trait for stable, machine-readable error codes.

/// Trait for mapping gosig errors to stable error code strings.
/// The CLI prints these in front of every fatal diagnostic so the host can
/// tell setup problems apart without parsing messages.
pub trait GosigErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const IO_ERROR: &str = "IO_ERROR";
pub const REQUEST_ERROR: &str = "REQUEST_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const RESOLVE_ERROR: &str = "RESOLVE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
