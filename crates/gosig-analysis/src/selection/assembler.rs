//! Deterministic ordering of a [`Selection`] into a [`FileReport`].

use super::report::FileReport;
use super::selector::Selection;

/// Order supported functions by declaration position and the name lists
/// lexicographically.
pub fn assemble(file_path: &str, package_name: &str, selection: Selection) -> FileReport {
    let Selection {
        mut parsed,
        mut not_supported,
        mut not_found,
    } = selection;
    parsed.sort_by_key(|function| function.position);
    not_supported.sort();
    not_found.sort();
    FileReport {
        file_path: file_path.to_string(),
        package_name: package_name.to_string(),
        parsed_functions: parsed,
        not_supported_functions_names: not_supported,
        not_found_functions_names: not_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::SourcePosition;
    use crate::selection::FunctionReport;

    fn report(name: &str, offset: usize) -> FunctionReport {
        FunctionReport {
            name: name.into(),
            parameters: vec![],
            result_types: vec![],
            position: SourcePosition {
                offset,
                line: 1,
                column: offset as u32 + 1,
            },
        }
    }

    #[test]
    fn orders_every_list() {
        let selection = Selection {
            parsed: vec![report("B", 40), report("A", 5)],
            not_supported: vec!["zeta".into(), "Alpha".into(), "beta".into()],
            not_found: vec!["y".into(), "x".into()],
        };
        let file = assemble("f.go", "f", selection);
        let names: Vec<_> = file.parsed_functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(file.not_supported_functions_names, ["Alpha", "beta", "zeta"]);
        assert_eq!(file.not_found_functions_names, ["x", "y"]);
    }
}
