//! Declaration-level type resolution for a single Go file.
//!
//! Builds the [`TypeTable`] and the set of [`Definition`]s for every
//! package-scope declaration. Function bodies are never inspected; the
//! resolver reports the same declaration errors a type checker would
//! (undefined names, invalid recursive types, redeclarations).

pub mod constants;
pub mod definitions;
pub mod imports;
mod signature;
mod type_expr;

use std::path::PathBuf;

use gosig_core::config::AnalysisConfig;
use gosig_core::errors::ResolveError;
use rustc_hash::{FxHashMap, FxHashSet};
use tree_sitter::Node;

use crate::parsers::{ParsedFile, SourcePosition};
use crate::types::{NamedId, Type, TypeTable};

pub use definitions::{Definition, DefinitionScope, FuncDef, TypeNameDef, ValueDef};
use imports::{ImportInsert, ImportTable};

/// Everything the selector needs to know about one file.
#[derive(Debug)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub package_name: String,
    pub definitions: Vec<Definition>,
    pub types: TypeTable,
}

impl ResolvedFile {
    /// Function definitions only, in no particular order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDef> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Func(func) => Some(func),
            _ => None,
        })
    }
}

/// Resolve all package-scope declarations of `file`.
pub fn resolve(file: &ParsedFile, config: &AnalysisConfig) -> Result<ResolvedFile, ResolveError> {
    let mut resolver = Resolver::new(file, config);
    resolver.collect_package_scope()?;
    resolver.resolve_declarations()?;
    tracing::debug!(
        path = %file.path.display(),
        definitions = resolver.definitions.len(),
        named_types = resolver.table.len(),
        "resolved declarations"
    );
    Ok(ResolvedFile {
        path: file.path.clone(),
        package_name: file.package_name.clone(),
        definitions: resolver.definitions,
        types: resolver.table,
    })
}

/// A package-scope object as declared in the source.
#[derive(Debug, Clone, Copy)]
enum PackageObject<'f> {
    Type { spec: Node<'f>, alias: bool },
    Func,
    Var,
    Const { value: Option<Node<'f>> },
}

pub(crate) struct Resolver<'f> {
    file: &'f ParsedFile,
    config: &'f AnalysisConfig,
    table: TypeTable,
    imports: ImportTable,
    scope: FxHashMap<&'f str, PackageObject<'f>>,
    /// Type declarations in source order, resolved eagerly after collection.
    type_specs: Vec<Node<'f>>,
    functions: Vec<Node<'f>>,
    methods: Vec<Node<'f>>,
    values: Vec<(Node<'f>, bool)>,
    /// Explicit types of `var`/`const` specs; checked but not recorded.
    value_types: Vec<Node<'f>>,
    /// Every defined type with its declaring name node.
    named_specs: Vec<(NamedId, Node<'f>)>,
    /// Defined types whose underlying type is that of another defined type
    /// still being resolved: `(id, target)`.
    pending_underlying: Vec<(NamedId, NamedId)>,
    /// Defined types already entered into the table (resolved or in progress).
    named: FxHashMap<&'f str, NamedId>,
    aliases: FxHashMap<&'f str, Type>,
    resolving_aliases: FxHashSet<&'f str>,
    /// Type parameter names visible at the current point.
    type_params: Vec<String>,
    definitions: Vec<Definition>,
}

impl<'f> Resolver<'f> {
    fn new(file: &'f ParsedFile, config: &'f AnalysisConfig) -> Self {
        Self {
            file,
            config,
            table: TypeTable::new(),
            imports: ImportTable::default(),
            scope: FxHashMap::default(),
            type_specs: Vec::new(),
            functions: Vec::new(),
            methods: Vec::new(),
            values: Vec::new(),
            value_types: Vec::new(),
            named_specs: Vec::new(),
            pending_underlying: Vec::new(),
            named: FxHashMap::default(),
            aliases: FxHashMap::default(),
            resolving_aliases: FxHashSet::default(),
            type_params: Vec::new(),
            definitions: Vec::new(),
        }
    }

    fn text(&self, node: Node<'f>) -> &'f str {
        self.file.text(&node)
    }

    fn location(&self, node: Node<'f>) -> (PathBuf, u32, u32) {
        let pos = SourcePosition::from_ts_node(&node);
        (self.file.path.clone(), pos.line, pos.column)
    }

    /// First pass: enter every package-scope name and import.
    fn collect_package_scope(&mut self) -> Result<(), ResolveError> {
        let file = self.file;
        for decl in named_children(file.root()) {
            match decl.kind() {
                "import_declaration" => self.collect_imports(decl)?,
                "type_declaration" => {
                    for spec in named_children(decl) {
                        let alias = match spec.kind() {
                            "type_spec" => false,
                            "type_alias" => true,
                            _ => continue,
                        };
                        let Some(name_node) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        self.declare(name_node, PackageObject::Type { spec, alias })?;
                        self.type_specs.push(spec);
                    }
                }
                "function_declaration" => {
                    if let Some(name_node) = decl.child_by_field_name("name") {
                        self.declare(name_node, PackageObject::Func)?;
                    }
                    self.functions.push(decl);
                }
                "method_declaration" => self.methods.push(decl),
                "var_declaration" => self.collect_values(decl, false)?,
                "const_declaration" => self.collect_values(decl, true)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_imports(&mut self, decl: Node<'f>) -> Result<(), ResolveError> {
        let mut specs = Vec::new();
        for child in named_children(decl) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|n| n.kind() == "import_spec"),
                ),
                _ => {}
            }
        }
        for spec in specs {
            let Some(path_node) = spec.child_by_field_name("path") else {
                continue;
            };
            let path = unquote(self.text(path_node));
            let alias = spec.child_by_field_name("name").map(|n| self.text(n));
            let position = SourcePosition::from_ts_node(&spec);
            if self.imports.add(alias, &path, position) == ImportInsert::Duplicate {
                let (path_buf, line, column) = self.location(spec);
                return Err(ResolveError::Redeclared {
                    path: path_buf,
                    line,
                    column,
                    name: alias
                        .map(str::to_string)
                        .unwrap_or_else(|| imports::default_package_name(&path)),
                });
            }
        }
        Ok(())
    }

    fn collect_values(&mut self, decl: Node<'f>, is_const: bool) -> Result<(), ResolveError> {
        let spec_kind = if is_const { "const_spec" } else { "var_spec" };
        let mut specs = Vec::new();
        for child in named_children(decl) {
            if child.kind() == spec_kind {
                specs.push(child);
            } else if child.kind().ends_with("_spec_list") {
                specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|n| n.kind() == spec_kind),
                );
            }
        }
        for spec in specs {
            let values = spec
                .child_by_field_name("value")
                .map(named_children)
                .unwrap_or_default();
            for (i, name_node) in field_children(spec, "name").into_iter().enumerate() {
                let object = if is_const {
                    PackageObject::Const {
                        value: values.get(i).copied(),
                    }
                } else {
                    PackageObject::Var
                };
                self.declare(name_node, object)?;
                self.values.push((name_node, is_const));
            }
            if let Some(type_node) = spec.child_by_field_name("type") {
                self.value_types.push(type_node);
            }
        }
        Ok(())
    }

    /// Enter `name_node` into the package scope, rejecting redeclarations.
    /// `init` functions and the blank identifier never conflict.
    fn declare(&mut self, name_node: Node<'f>, object: PackageObject<'f>) -> Result<(), ResolveError> {
        let name = self.text(name_node);
        if name == "_" || (name == "init" && matches!(object, PackageObject::Func)) {
            return Ok(());
        }
        if self.scope.contains_key(name) {
            let (path, line, column) = self.location(name_node);
            return Err(ResolveError::Redeclared {
                path,
                line,
                column,
                name: name.to_string(),
            });
        }
        self.scope.insert(name, object);
        Ok(())
    }

    /// Second pass: resolve types, then function and method signatures.
    fn resolve_declarations(&mut self) -> Result<(), ResolveError> {
        for spec in self.type_specs.clone() {
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name_node);
            let alias = spec.kind() == "type_alias";
            let ty = if name == "_" {
                self.resolve_anonymous_spec(spec)?
            } else {
                self.resolve_declared_type(name, name_node)?
            };
            self.definitions.push(Definition::TypeName(TypeNameDef {
                name: name.to_string(),
                ty,
                alias,
                position: SourcePosition::from_ts_node(&name_node),
            }));
        }
        self.settle_pending_underlying()?;
        self.check_value_cycles()?;

        for type_node in std::mem::take(&mut self.value_types) {
            self.resolve_type(type_node)?;
        }
        for (name_node, is_const) in std::mem::take(&mut self.values) {
            let def = ValueDef {
                name: self.text(name_node).to_string(),
                position: SourcePosition::from_ts_node(&name_node),
            };
            self.definitions.push(if is_const {
                Definition::Const(def)
            } else {
                Definition::Var(def)
            });
        }

        for decl in self.functions.clone() {
            let func = self.resolve_function(decl)?;
            self.definitions.push(Definition::Func(func));
        }

        let mut declared_methods: FxHashSet<(String, String)> = FxHashSet::default();
        for decl in self.methods.clone() {
            let (func, receiver_base) = self.resolve_method(decl)?;
            if func.name != "_" && !declared_methods.insert((receiver_base.clone(), func.name.clone())) {
                let name_node = decl.child_by_field_name("name").unwrap_or(decl);
                let (path, line, column) = self.location(name_node);
                return Err(ResolveError::DuplicateMethod {
                    path,
                    line,
                    column,
                    receiver: receiver_base,
                    name: func.name,
                });
            }
            self.definitions.push(Definition::Func(func));
        }
        Ok(())
    }
}

/// Named children of `node`, skipping comments.
pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// All children stored under `field`.
pub(crate) fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Strip the quotes of an interpreted or raw string literal.
pub(crate) fn unquote(literal: &str) -> String {
    let trimmed = literal.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(trimmed)
        .to_string()
}
