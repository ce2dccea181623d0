//! Analysis configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default cap on a single source file: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Underlying kinds an external type may be declared as.
pub const EXTERNAL_UNDERLYING_KINDS: &[&str] = &[
    "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128", "byte",
    "rune", "error",
];

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Largest source file accepted, in bytes. Default: 10 MiB.
    pub max_file_size: Option<u64>,
    /// Extra imported types with a known underlying kind, keyed by
    /// `import/path.TypeName`. Values are basic kind names or `error`.
    #[serde(default)]
    pub external_types: HashMap<String, String>,
}

impl AnalysisConfig {
    /// Returns the effective max file size, defaulting to 10 MiB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Looks up a configured external type by import path and type name.
    pub fn external_type(&self, path: &str, name: &str) -> Option<&str> {
        self.external_types
            .get(&format!("{path}.{name}"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_file_size() {
        let config = AnalysisConfig::default();
        assert_eq!(config.effective_max_file_size(), DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn external_type_lookup_uses_full_path() {
        let mut config = AnalysisConfig::default();
        config
            .external_types
            .insert("github.com/acme/units.Meters".into(), "float64".into());

        assert_eq!(
            config.external_type("github.com/acme/units", "Meters"),
            Some("float64")
        );
        assert_eq!(config.external_type("units", "Meters"), None);
    }
}
