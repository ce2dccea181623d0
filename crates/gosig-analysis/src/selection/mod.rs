//! Function selection and report assembly.

pub mod assembler;
pub mod report;
pub mod selector;

pub use assembler::assemble;
pub use report::{BatchReport, FileReport, FunctionReport, Parameter};
pub use selector::{select_functions, Selection};
