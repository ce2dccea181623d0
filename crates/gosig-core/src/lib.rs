//! gosig-core: shared foundation for the gosig signature extractor.
//!
//! - Errors: one `thiserror` enum per subsystem plus the batch aggregate
//! - Config: TOML configuration with env overrides
//! - Tracing: `tracing-subscriber` setup driven by `GOSIG_LOG`

pub mod config;
pub mod errors;
pub mod tracing;

pub use config::{AnalysisConfig, GosigConfig};
pub use errors::{BatchError, GosigErrorCode};
