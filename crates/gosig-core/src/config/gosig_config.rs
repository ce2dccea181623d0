//! Top-level gosig configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::analysis_config::EXTERNAL_UNDERLYING_KINDS;
use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Name of the project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "gosig.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GOSIG_*`)
/// 3. Project config (`--config` path, or `gosig.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GosigConfig {
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_file_size: Option<u64>,
}

impl GosigConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist; the implicit `gosig.toml` in
    /// `root` is optional.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(
            max_file_size = config.analysis.effective_max_file_size(),
            external_types = config.analysis.external_types.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: GosigConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &GosigConfig) -> Result<(), ConfigError> {
        if let Some(max_file_size) = config.analysis.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        for (qualified, underlying) in &config.analysis.external_types {
            match qualified.rsplit_once('.') {
                Some((path, name)) if !path.is_empty() && !name.is_empty() => {}
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("analysis.external_types.\"{qualified}\""),
                        message: "key must have the form import/path.TypeName".to_string(),
                    });
                }
            }
            if !EXTERNAL_UNDERLYING_KINDS.contains(&underlying.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("analysis.external_types.\"{qualified}\""),
                    message: format!("unknown underlying kind '{underlying}'"),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut GosigConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: GosigConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values and non-empty maps win.
    fn merge(base: &mut GosigConfig, other: &GosigConfig) {
        if other.analysis.max_file_size.is_some() {
            base.analysis.max_file_size = other.analysis.max_file_size;
        }
        for (qualified, underlying) in &other.analysis.external_types {
            base.analysis
                .external_types
                .insert(qualified.clone(), underlying.clone());
        }
    }

    fn apply_env_overrides(config: &mut GosigConfig) {
        if let Ok(val) = std::env::var("GOSIG_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.analysis.max_file_size = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut GosigConfig, cli: &CliOverrides) {
        if cli.max_file_size.is_some() {
            config.analysis.max_file_size = cli.max_file_size;
        }
    }
}
