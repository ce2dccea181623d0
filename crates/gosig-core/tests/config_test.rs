//! Tests for the gosig configuration system.

use std::sync::Mutex;

use gosig_core::config::analysis_config::DEFAULT_MAX_FILE_SIZE;
use gosig_core::config::{CliOverrides, GosigConfig};
use gosig_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_gosig_env_vars() {
    std::env::remove_var("GOSIG_MAX_FILE_SIZE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gosig_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("gosig.toml"),
        r#"
[analysis]
max_file_size = 2_000

[analysis.external_types]
"github.com/acme/units.Meters" = "float64"
"#,
    )
    .unwrap();

    let config = GosigConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.analysis.max_file_size, Some(2_000));
    assert_eq!(
        config.analysis.external_type("github.com/acme/units", "Meters"),
        Some("float64")
    );

    std::env::set_var("GOSIG_MAX_FILE_SIZE", "5000");
    let config = GosigConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.analysis.max_file_size, Some(5_000));

    let cli = CliOverrides {
        max_file_size: Some(9_000),
    };
    let config = GosigConfig::load(dir.path(), None, Some(&cli)).unwrap();
    assert_eq!(config.analysis.max_file_size, Some(9_000));

    clear_gosig_env_vars();
}

#[test]
fn test_missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gosig_env_vars();

    let dir = tempdir();
    let config = GosigConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.analysis.effective_max_file_size(), DEFAULT_MAX_FILE_SIZE);
    assert!(config.analysis.external_types.is_empty());
}

#[test]
fn test_explicit_config_path_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gosig_env_vars();

    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    let err = GosigConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gosig_env_vars();

    let dir = tempdir();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[analysis\nmax_file_size = ").unwrap();
    let err = GosigConfig::load(dir.path(), Some(&path), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_zero_max_file_size_rejected() {
    let err = GosigConfig::from_toml("[analysis]\nmax_file_size = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_unknown_external_kind_rejected() {
    let err = GosigConfig::from_toml(
        r#"
[analysis.external_types]
"example.com/geo.Point" = "struct"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_external_key_needs_a_path() {
    let err = GosigConfig::from_toml(
        r#"
[analysis.external_types]
"Point" = "int"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
