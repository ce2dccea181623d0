//! Sequential batch analysis. The first failure aborts the batch and no
//! report is written.

use std::fs;
use std::path::Path;

use gosig_core::config::AnalysisConfig;
use gosig_core::errors::{BatchError, IoError, RequestError};

use super::request::{AnalysisBatch, AnalysisRequest};
use crate::parsers::GoParser;
use crate::resolver;
use crate::selection::{assemble, select_functions, BatchReport, FileReport};

/// Read the request document at `targets_path`, analyze every target and
/// write the pretty-printed report to `results_path`.
pub fn run(targets_path: &Path, results_path: &Path, config: &AnalysisConfig) -> Result<BatchReport, BatchError> {
    let json = fs::read_to_string(targets_path).map_err(|source| IoError::Read {
        path: targets_path.to_path_buf(),
        source,
    })?;
    let batch = AnalysisBatch::from_json(&json, targets_path)?;
    let report = analyze_batch(&batch.targets, config)?;

    let rendered = serde_json::to_string_pretty(&report).map_err(|e| RequestError::Serialize {
        message: e.to_string(),
    })?;
    fs::write(results_path, rendered).map_err(|source| IoError::Write {
        path: results_path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        results = %results_path.display(),
        files = report.results.len(),
        "report written"
    );
    Ok(report)
}

/// Analyze requests in order, stopping at the first failure.
pub fn analyze_batch(requests: &[AnalysisRequest], config: &AnalysisConfig) -> Result<BatchReport, BatchError> {
    tracing::info!(targets = requests.len(), "analyzing batch");
    let mut results = Vec::with_capacity(requests.len());
    for request in requests {
        results.push(analyze_file(request, config)?);
    }
    Ok(BatchReport { results })
}

/// Read and analyze the file named by `request`.
pub fn analyze_file(request: &AnalysisRequest, config: &AnalysisConfig) -> Result<FileReport, BatchError> {
    let path = Path::new(&request.file_path);
    let max = config.effective_max_file_size();
    let size = fs::metadata(path)
        .map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > max {
        return Err(IoError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max,
        }
        .into());
    }
    let bytes = fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut parser = GoParser::new()?;
    let parsed = parser.parse(&bytes, path)?;
    analyze_parsed(&request.file_path, parsed, &request.selected_function_names, config)
}

/// Analyze in-memory Go source as if it were read from `path`.
pub fn analyze_source(
    path: &str,
    source: &str,
    names: &[String],
    config: &AnalysisConfig,
) -> Result<FileReport, BatchError> {
    let mut parser = GoParser::new()?;
    let parsed = parser.parse_source(source.to_string(), Path::new(path))?;
    analyze_parsed(path, parsed, names, config)
}

fn analyze_parsed(
    file_path: &str,
    parsed: crate::parsers::ParsedFile,
    names: &[String],
    config: &AnalysisConfig,
) -> Result<FileReport, BatchError> {
    let resolved = resolver::resolve(&parsed, config).inspect_err(|e| {
        tracing::warn!(path = file_path, error = %e, "type resolution failed");
    })?;
    let selection = select_functions(&resolved, names);
    let report = assemble(file_path, &resolved.package_name, selection);
    tracing::debug!(
        path = file_path,
        package = %report.package_name,
        parse_time_us = parsed.parse_time_us,
        parsed = report.parsed_functions.len(),
        not_supported = report.not_supported_functions_names.len(),
        not_found = report.not_found_functions_names.len(),
        "file analyzed"
    );
    Ok(report)
}
