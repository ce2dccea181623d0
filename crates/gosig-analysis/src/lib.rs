//! # gosig-analysis
//!
//! Extracts simplified signatures of selected top-level Go functions for a
//! test-generation host.
//!
//! Pipeline per file: [`parsers`] (tree-sitter) → [`resolver`]
//! (declaration-level type resolution) → [`selection`] (name matching,
//! driving [`classifier`]) → report. [`batch`] runs the pipeline over a
//! request document.

pub mod batch;
pub mod classifier;
pub mod parsers;
pub mod resolver;
pub mod selection;
pub mod types;

pub use batch::{analyze_batch, analyze_file, analyze_source, run, AnalysisBatch, AnalysisRequest};
pub use classifier::{SignatureSupport, SimplifiedType, UnsupportedReason};
pub use selection::{BatchReport, FileReport, FunctionReport, Parameter};
