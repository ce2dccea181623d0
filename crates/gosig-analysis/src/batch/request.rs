//! Request payload sent by the host.

use std::path::Path;

use gosig_core::errors::RequestError;
use serde::{Deserialize, Serialize};

/// One file to analyze. A missing name list selects every function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub file_path: String,
    #[serde(
        rename = "selectedFunctionsNames",
        alias = "selectedFunctionNames",
        default
    )]
    pub selected_function_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisBatch {
    pub targets: Vec<AnalysisRequest>,
}

impl AnalysisBatch {
    /// Decode a request document read from `path`.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, RequestError> {
        serde_json::from_str(json).map_err(|e| RequestError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_name_list_spellings() {
        let json = r#"{"targets": [
            {"filePath": "a.go", "selectedFunctionsNames": ["A"]},
            {"filePath": "b.go", "selectedFunctionNames": ["B"], "extra": 1},
            {"filePath": "c.go"}
        ]}"#;
        let batch = AnalysisBatch::from_json(json, Path::new("targets.json")).unwrap();
        assert_eq!(batch.targets.len(), 3);
        assert_eq!(batch.targets[0].selected_function_names, ["A"]);
        assert_eq!(batch.targets[1].selected_function_names, ["B"]);
        assert!(batch.targets[2].selected_function_names.is_empty());
    }

    #[test]
    fn malformed_requests_are_rejected() {
        for json in [
            r#"{}"#,
            r#"{"targets": [{"selectedFunctionsNames": []}]}"#,
            r#"{"targets": [{"filePath": 3}]}"#,
            r#"{"targets": [{"filePath": "a.go", "selectedFunctionsNames": "A"}]}"#,
            "not json",
        ] {
            let err = AnalysisBatch::from_json(json, Path::new("t.json")).unwrap_err();
            assert!(matches!(err, RequestError::Malformed { .. }), "{json}");
        }
    }
}
