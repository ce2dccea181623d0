//! Function selection over real Go fixtures, plus ordering and partition
//! properties of the selector.

use std::path::Path;

use gosig_analysis::parsers::SourcePosition;
use gosig_analysis::resolver::{Definition, DefinitionScope, FuncDef, ResolvedFile};
use gosig_analysis::selection::{assemble, select_functions};
use gosig_analysis::types::{BasicKind, Signature, Type, TypeTable, Var};
use gosig_analysis::{analyze_source, FileReport};
use gosig_core::AnalysisConfig;
use proptest::prelude::*;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/go")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn analyze(name: &str, requested: &[&str]) -> FileReport {
    let names: Vec<String> = requested.iter().map(|s| s.to_string()).collect();
    analyze_source(name, &fixture(name), &names, &AnalysisConfig::default())
        .unwrap_or_else(|e| panic!("Failed to analyze {}: {}", name, e))
}

fn parsed_names(report: &FileReport) -> Vec<&str> {
    report.parsed_functions.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn scenario_a_primitive_function_by_name() {
    let report = analyze("calc.go", &["Add"]);
    assert_eq!(report.package_name, "calc");
    assert_eq!(report.parsed_functions.len(), 1);
    let add = &report.parsed_functions[0];
    assert_eq!(add.name, "Add");
    assert_eq!(add.parameters.len(), 2);
    assert_eq!(add.parameters[0].name, "a");
    assert_eq!(add.parameters[1].name, "b");
    assert_eq!(add.parameters[1].ty.name, "int");
    assert_eq!(add.result_types.len(), 1);
    assert_eq!(add.result_types[0].name, "int");
    assert!(!add.result_types[0].implements_error);
    assert!(report.not_supported_functions_names.is_empty());
    assert!(report.not_found_functions_names.is_empty());
}

#[test]
fn scenario_b_method_is_unsupported() {
    let report = analyze("calc.go", &["Push"]);
    assert!(report.parsed_functions.is_empty());
    assert_eq!(report.not_supported_functions_names, ["Push"]);
    assert!(report.not_found_functions_names.is_empty());
}

#[test]
fn scenario_c_unknown_name_is_not_found() {
    let report = analyze("calc.go", &["Multiply", "Add"]);
    assert_eq!(parsed_names(&report), ["Add"]);
    assert_eq!(report.not_found_functions_names, ["Multiply"]);
}

#[test]
fn scenario_d_error_result_is_supported() {
    let report = analyze("calc.go", &["Divide"]);
    let divide = &report.parsed_functions[0];
    assert_eq!(divide.result_types.len(), 2);
    assert_eq!(divide.result_types[0].name, "float64");
    assert!(!divide.result_types[0].implements_error);
    assert_eq!(divide.result_types[1].name, "error");
    assert!(divide.result_types[1].implements_error);
}

#[test]
fn scenario_e_error_parameter_is_unsupported() {
    let report = analyze("calc.go", &["Wrap"]);
    assert!(report.parsed_functions.is_empty());
    assert_eq!(report.not_supported_functions_names, ["Wrap"]);
}

#[test]
fn empty_selection_selects_every_function() {
    let report = analyze("calc.go", &[]);
    assert_eq!(parsed_names(&report), ["Add", "Divide", "ToFahrenheit", "Sleep"]);
    assert_eq!(
        report.not_supported_functions_names,
        ["Max", "Names", "Push", "Sum", "Wrap"]
    );
    assert!(report.not_found_functions_names.is_empty());
}

#[test]
fn defined_and_aliased_types_report_underlying_names() {
    let report = analyze("calc.go", &["ToFahrenheit", "Sleep"]);
    let convert = &report.parsed_functions[0];
    assert_eq!(convert.parameters[0].ty.name, "float64");
    assert_eq!(convert.result_types[0].name, "float64");
    let sleep = &report.parsed_functions[1];
    assert_eq!(sleep.parameters[0].ty.name, "int64");
}

#[test]
fn error_contract_shapes() {
    let report = analyze("errors.go", &[]);
    assert_eq!(parsed_names(&report), ["Check", "Rewrap"]);
    let check = &report.parsed_functions[0];
    assert_eq!(check.result_types[0].name, "error");
    assert!(check.result_types[0].implements_error);
    let rewrap = &report.parsed_functions[1];
    assert!(rewrap.result_types[1].implements_error);
    assert_eq!(
        report.not_supported_functions_names,
        ["Accept", "Describe", "Name"]
    );
}

#[test]
fn interface_methods_are_never_selectable() {
    let report = analyze("errors.go", &["Read", "Error", "Check"]);
    assert_eq!(parsed_names(&report), ["Check"]);
    assert_eq!(report.not_found_functions_names, ["Error", "Read"]);
}

#[test]
fn not_found_is_reported_once() {
    let report = analyze("calc.go", &["Gone", "Gone", "Add", "Gone"]);
    assert_eq!(report.not_found_functions_names, ["Gone"]);
}

#[test]
fn function_wins_over_same_named_method() {
    let source = r#"package run

type Job struct{}

func (j Job) Run() int { return 1 }

func Run(n int) int { return n }
"#;
    let report = analyze_source("run.go", source, &["Run".into()], &AnalysisConfig::default()).unwrap();
    assert_eq!(parsed_names(&report), ["Run"]);
    assert!(report.not_supported_functions_names.is_empty());
}

fn definition(name: &str, offset: usize, supported: bool) -> Definition {
    let ty = if supported {
        Type::Basic(BasicKind::Int)
    } else {
        Type::Slice(Box::new(Type::Basic(BasicKind::Int)))
    };
    Definition::Func(FuncDef {
        name: name.to_string(),
        signature: Signature {
            params: vec![Var {
                name: "x".into(),
                ty,
            }],
            ..Signature::default()
        },
        position: SourcePosition {
            offset,
            line: 1,
            column: offset as u32 + 1,
        },
        scope: DefinitionScope::Package,
    })
}

fn resolved(definitions: Vec<Definition>) -> ResolvedFile {
    ResolvedFile {
        path: "p.go".into(),
        package_name: "p".into(),
        definitions,
        types: TypeTable::new(),
    }
}

proptest! {
    #[test]
    fn report_is_independent_of_definition_order(
        funcs in prop::collection::btree_map("[A-Z][a-z]{0,6}", any::<bool>(), 0..12),
        extra in prop::collection::vec("[A-Z][a-z]{0,6}", 0..6),
        seed in any::<u64>(),
    ) {
        let definitions: Vec<Definition> = funcs
            .iter()
            .enumerate()
            .map(|(i, (name, supported))| definition(name, i * 10, *supported))
            .collect();
        let mut shuffled = definitions.clone();
        let len = shuffled.len().max(1);
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();

        let mut requested: Vec<String> = funcs.keys().cloned().collect();
        requested.extend(extra.iter().cloned());

        let a = assemble("p.go", "p", select_functions(&resolved(definitions), &requested));
        let b = assemble("p.go", "p", select_functions(&resolved(shuffled), &requested));
        prop_assert_eq!(&a, &b);

        let positions: Vec<usize> = a.parsed_functions.iter().map(|f| f.position.offset).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        prop_assert_eq!(positions, sorted);

        let mut names = a.not_supported_functions_names.clone();
        names.sort();
        prop_assert_eq!(&names, &a.not_supported_functions_names);
    }

    #[test]
    fn every_requested_name_lands_in_exactly_one_list(
        funcs in prop::collection::btree_map("[a-z]{1,5}", any::<bool>(), 0..10),
        requested in prop::collection::vec("[a-z]{1,5}", 0..10),
    ) {
        let definitions: Vec<Definition> = funcs
            .iter()
            .enumerate()
            .map(|(i, (name, supported))| definition(name, i, *supported))
            .collect();
        let report = assemble("p.go", "p", select_functions(&resolved(definitions), &requested));

        for name in &requested {
            let in_parsed = report.parsed_functions.iter().filter(|f| &f.name == name).count();
            let in_unsupported = report.not_supported_functions_names.iter().filter(|n| *n == name).count();
            let in_not_found = report.not_found_functions_names.iter().filter(|n| *n == name).count();
            prop_assert_eq!(in_parsed + in_unsupported + in_not_found, 1, "{}", name);
            prop_assert_eq!(in_not_found == 1, !funcs.contains_key(name));
        }
        for function in &report.parsed_functions {
            prop_assert!(requested.contains(&function.name) || requested.is_empty());
        }
    }
}
