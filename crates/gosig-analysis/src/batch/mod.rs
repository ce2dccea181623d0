//! Batch entry points: request decoding, per-file analysis and report output.

pub mod request;
pub mod runner;

pub use request::{AnalysisBatch, AnalysisRequest};
pub use runner::{analyze_batch, analyze_file, analyze_source, run};
