//! Report types written back to the host.

use serde::{Deserialize, Serialize};

use crate::classifier::SimplifiedType;
use crate::parsers::SourcePosition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SimplifiedType,
}

/// A supported function with its simplified signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionReport {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub result_types: Vec<SimplifiedType>,
    /// Declaration position; orders the report and is never serialized.
    #[serde(skip)]
    pub position: SourcePosition,
}

/// Analysis outcome for one requested file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_path: String,
    pub package_name: String,
    pub parsed_functions: Vec<FunctionReport>,
    pub not_supported_functions_names: Vec<String>,
    pub not_found_functions_names: Vec<String>,
}

/// One report per request, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<FileReport>,
}
