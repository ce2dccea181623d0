//! Configuration system for gosig.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod analysis_config;
pub mod gosig_config;

pub use analysis_config::AnalysisConfig;
pub use gosig_config::{CliOverrides, GosigConfig};
