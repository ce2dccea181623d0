//! Matches requested names against the file's top-level functions and
//! classifies each match.

use rustc_hash::FxHashMap;

use super::report::{FunctionReport, Parameter};
use crate::classifier::{classify_signature, simplify};
use crate::resolver::{Definition, FuncDef, ResolvedFile};

/// Unordered partition of the requested functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub parsed: Vec<FunctionReport>,
    pub not_supported: Vec<String>,
    pub not_found: Vec<String>,
}

/// Select functions of `file` by name. An empty `requested` list selects
/// every top-level function.
pub fn select_functions(file: &ResolvedFile, requested: &[String]) -> Selection {
    let mut found: FxHashMap<&str, bool> = requested.iter().map(|name| (name.as_str(), false)).collect();
    let select_all = requested.is_empty();
    let mut selection = Selection::default();

    for def in &file.definitions {
        let Definition::Func(func) = def else {
            continue;
        };
        if !func.is_top_level() {
            continue;
        }
        if !select_all {
            match found.get_mut(func.name.as_str()) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
        }
        classify_into(&mut selection, func, file);
    }

    selection.not_found = found
        .into_iter()
        .filter(|(_, seen)| !seen)
        .map(|(name, _)| name.to_string())
        .collect();
    selection
}

fn classify_into(selection: &mut Selection, func: &FuncDef, file: &ResolvedFile) {
    let support = classify_signature(&func.signature, &file.types);
    if !support.is_supported() {
        tracing::debug!(
            function = %func.name,
            reasons = ?support.reasons,
            "unsupported signature"
        );
        selection.not_supported.push(func.name.clone());
        return;
    }
    let parameters = func
        .signature
        .params
        .iter()
        .map(|param| Parameter {
            name: param.name.clone(),
            ty: simplify(&param.ty, &file.types),
        })
        .collect();
    let result_types = func
        .signature
        .results
        .iter()
        .map(|result| simplify(&result.ty, &file.types))
        .collect();
    selection.parsed.push(FunctionReport {
        name: func.name.clone(),
        parameters,
        result_types,
        position: func.position,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::SourcePosition;
    use crate::resolver::{DefinitionScope, ValueDef};
    use crate::types::{BasicKind, Signature, Type, TypeTable, Var};

    fn func(name: &str, offset: usize, scope: DefinitionScope) -> Definition {
        Definition::Func(FuncDef {
            name: name.into(),
            signature: Signature {
                params: vec![Var {
                    name: "x".into(),
                    ty: Type::Basic(BasicKind::Int),
                }],
                ..Signature::default()
            },
            position: SourcePosition {
                offset,
                line: offset as u32 + 1,
                column: 1,
            },
            scope,
        })
    }

    fn file(definitions: Vec<Definition>) -> ResolvedFile {
        ResolvedFile {
            path: "a.go".into(),
            package_name: "a".into(),
            definitions,
            types: TypeTable::new(),
        }
    }

    #[test]
    fn interface_methods_and_values_are_not_selectable() {
        let resolved = file(vec![
            func("Read", 0, DefinitionScope::InterfaceMethod),
            Definition::Var(ValueDef {
                name: "Count".into(),
                position: SourcePosition::default(),
            }),
        ]);
        let selection = select_functions(&resolved, &["Read".into(), "Count".into()]);
        assert!(selection.parsed.is_empty());
        let mut not_found = selection.not_found;
        not_found.sort();
        assert_eq!(not_found, vec!["Count".to_string(), "Read".to_string()]);
    }

    #[test]
    fn first_homonym_wins() {
        let resolved = file(vec![
            func("Run", 10, DefinitionScope::Package),
            func("Run", 20, DefinitionScope::Package),
        ]);
        let selection = select_functions(&resolved, &["Run".into()]);
        assert_eq!(selection.parsed.len(), 1);
        assert_eq!(selection.parsed[0].position.offset, 10);
    }

    #[test]
    fn duplicate_requests_collapse() {
        let resolved = file(vec![]);
        let selection = select_functions(&resolved, &["Gone".into(), "Gone".into()]);
        assert_eq!(selection.not_found, vec!["Gone".to_string()]);
    }
}
