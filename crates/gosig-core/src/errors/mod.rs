//! Error handling for gosig.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod batch_error;
pub mod config_error;
pub mod error_code;
pub mod io_error;
pub mod parse_error;
pub mod request_error;
pub mod resolve_error;

pub use batch_error::BatchError;
pub use config_error::ConfigError;
pub use error_code::GosigErrorCode;
pub use io_error::IoError;
pub use parse_error::ParseError;
pub use request_error::RequestError;
pub use resolve_error::ResolveError;
