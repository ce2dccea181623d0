//! Type expressions: identifiers, qualified and generic types, literals.

use gosig_core::errors::ResolveError;
use rustc_hash::FxHashSet;
use tree_sitter::Node;

use super::constants::parse_int_literal;
use super::definitions::{Definition, DefinitionScope, FuncDef};
use super::{field_children, named_children, unquote, PackageObject, Resolver};
use crate::parsers::SourcePosition;
use crate::types::universe::{self, UniverseType};
use crate::types::{
    external, ArrayLen, BasicKind, ChanDir, Embedded, ExternalType, Field, InterfaceType, Method,
    NamedId, NamedRef, Term, Type, TypeParam, COMPARABLE_ID, ERROR_ID,
};

impl<'f> Resolver<'f> {
    pub(super) fn resolve_type(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        match node.kind() {
            "type_identifier" | "identifier" => {
                let ty = self.resolve_type_name(node)?;
                self.require_instantiated(&ty, node)?;
                Ok(ty)
            }
            "qualified_type" => self.resolve_qualified(node, Vec::new()),
            "generic_type" => self.resolve_generic(node),
            "pointer_type" => {
                let elem = self.first_named_child(node)?;
                Ok(Type::Pointer(Box::new(self.resolve_type(elem)?)))
            }
            "slice_type" => {
                let elem = self.required_field(node, "element")?;
                Ok(Type::Slice(Box::new(self.resolve_type(elem)?)))
            }
            "array_type" => {
                let len = self.array_len(self.required_field(node, "length")?);
                let elem = self.required_field(node, "element")?;
                Ok(Type::Array {
                    len,
                    elem: Box::new(self.resolve_type(elem)?),
                })
            }
            "implicit_length_array_type" => {
                let elem = self.required_field(node, "element")?;
                Ok(Type::Array {
                    len: ArrayLen::Unevaluated("...".to_string()),
                    elem: Box::new(self.resolve_type(elem)?),
                })
            }
            "map_type" => {
                let key = self.required_field(node, "key")?;
                let value = self.required_field(node, "value")?;
                Ok(Type::Map {
                    key: Box::new(self.resolve_type(key)?),
                    value: Box::new(self.resolve_type(value)?),
                })
            }
            "channel_type" => {
                let elem = self.required_field(node, "value")?;
                Ok(Type::Chan {
                    dir: channel_direction(node),
                    elem: Box::new(self.resolve_type(elem)?),
                })
            }
            "function_type" => Ok(Type::Func(Box::new(self.resolve_signature_parts(node)?))),
            "struct_type" => self.resolve_struct(node),
            "interface_type" => self.resolve_interface(node),
            "parenthesized_type" | "type_elem" | "type_constraint" | "constraint_elem" => {
                self.resolve_type_elem(node)
            }
            "negated_type" => Ok(Type::Interface(InterfaceType {
                embeddeds: vec![Embedded::Union(vec![self.resolve_term(node)?])],
                ..InterfaceType::default()
            })),
            _ => Err(self.not_a_type(node)),
        }
    }

    /// `type _ T` declares nothing but `T` must still resolve.
    pub(super) fn resolve_anonymous_spec(&mut self, spec: Node<'f>) -> Result<Type, ResolveError> {
        let type_node = self.required_field(spec, "type")?;
        let saved = std::mem::take(&mut self.type_params);
        let result = self.resolve_type(type_node);
        self.type_params = saved;
        result
    }

    fn resolve_type_name(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        let name = self.text(node);
        if self.type_params.iter().any(|p| p == name) {
            return Ok(Type::TypeParam(name.to_string()));
        }
        match self.scope.get(name).copied() {
            Some(PackageObject::Type { .. }) => return self.resolve_declared_type(name, node),
            Some(_) => return Err(self.not_a_type(node)),
            None => {}
        }
        match universe::lookup(name) {
            Some(UniverseType::Basic(kind)) => Ok(Type::Basic(kind)),
            Some(UniverseType::Error) => Ok(Type::named(ERROR_ID)),
            Some(UniverseType::Any) => Ok(Type::empty_interface()),
            Some(UniverseType::Comparable) => Ok(Type::named(COMPARABLE_ID)),
            None if universe::is_value(name) || self.imports.lookup(name).is_some() => {
                Err(self.not_a_type(node))
            }
            None => match self.imports.dot_import() {
                Some(path) => Ok(self.external_type(path, name)),
                None => {
                    let (path, line, column) = self.location(node);
                    Err(ResolveError::UndefinedType {
                        path,
                        line,
                        column,
                        name: name.to_string(),
                    })
                }
            },
        }
    }

    /// Resolve a package-scope type declaration by name, entering defined
    /// types into the table on first use.
    pub(super) fn resolve_declared_type(
        &mut self,
        name: &'f str,
        use_node: Node<'f>,
    ) -> Result<Type, ResolveError> {
        let Some(PackageObject::Type { spec, alias }) = self.scope.get(name).copied() else {
            return Err(self.not_a_type(use_node));
        };
        if alias {
            return self.resolve_alias(name, spec, use_node);
        }
        if let Some(id) = self.named.get(name) {
            return Ok(Type::named(*id));
        }

        let id = self.table.declare(name, &self.file.package_name);
        self.named.insert(name, id);
        let name_node = spec.child_by_field_name("name").unwrap_or(spec);
        self.named_specs.push((id, name_node));

        // Aliases referenced from inside the defined type reach it through
        // `named`, so they are not cycles.
        let saved = std::mem::take(&mut self.type_params);
        let saved_aliases = std::mem::take(&mut self.resolving_aliases);
        let result = self.resolve_defined(id, spec);
        self.type_params = saved;
        self.resolving_aliases = saved_aliases;
        result?;
        Ok(Type::named(id))
    }

    /// A generic defined type may only be used with type arguments.
    fn require_instantiated(&self, ty: &Type, node: Node<'f>) -> Result<(), ResolveError> {
        let Type::Named(named_ref) = ty else {
            return Ok(());
        };
        let expected = self.table.get(named_ref.id).type_params.len();
        if named_ref.args.is_empty() && expected > 0 {
            let (path, line, column) = self.location(node);
            return Err(ResolveError::TypeArgumentCount {
                path,
                line,
                column,
                name: self.text(node).to_string(),
                expected,
                actual: 0,
            });
        }
        Ok(())
    }

    fn resolve_defined(&mut self, id: NamedId, spec: Node<'f>) -> Result<(), ResolveError> {
        if let Some(list) = spec.child_by_field_name("type_parameters") {
            let params = self.resolve_type_params(list)?;
            self.table.set_type_params(id, params);
        }
        let rhs = self.resolve_type(self.required_field(spec, "type")?)?;
        let underlying = match &rhs {
            Type::Named(target) if self.table.get(target.id).underlying.is_none() => {
                self.pending_underlying.push((id, target.id));
                return Ok(());
            }
            Type::Named(_) | Type::External(_) => self.table.underlying(&rhs),
            _ => rhs,
        };
        self.table.set_underlying(id, underlying);
        Ok(())
    }

    fn resolve_alias(
        &mut self,
        name: &'f str,
        spec: Node<'f>,
        use_node: Node<'f>,
    ) -> Result<Type, ResolveError> {
        if let Some(ty) = self.aliases.get(name) {
            return Ok(ty.clone());
        }
        if !self.resolving_aliases.insert(name) {
            return Err(self.recursive_type(use_node, name));
        }
        let saved = std::mem::take(&mut self.type_params);
        let result = self
            .required_field(spec, "type")
            .and_then(|type_node| self.resolve_type(type_node));
        self.type_params = saved;
        self.resolving_aliases.remove(name);
        let ty = result?;
        self.aliases.insert(name, ty.clone());
        Ok(ty)
    }

    /// Give every deferred defined type the underlying type of its target.
    /// Whatever cannot be settled is a cycle of defined types.
    pub(super) fn settle_pending_underlying(&mut self) -> Result<(), ResolveError> {
        while !self.pending_underlying.is_empty() {
            let before = self.pending_underlying.len();
            let pending = std::mem::take(&mut self.pending_underlying);
            for (id, target) in pending {
                match self.table.get(target).underlying.clone() {
                    Some(underlying) => self.table.set_underlying(id, underlying),
                    None => self.pending_underlying.push((id, target)),
                }
            }
            if self.pending_underlying.len() == before {
                let (id, _) = self.pending_underlying[0];
                return Err(self.recursive_named(id));
            }
        }
        Ok(())
    }

    /// Reject defined types that contain themselves by value through arrays
    /// or struct fields.
    pub(super) fn check_value_cycles(&self) -> Result<(), ResolveError> {
        for (id, _) in &self.named_specs {
            let mut visited = FxHashSet::default();
            let underlying = self.table.underlying(&Type::named(*id));
            if self.contains_by_value(*id, &underlying, &mut visited) {
                return Err(self.recursive_named(*id));
            }
        }
        Ok(())
    }

    fn contains_by_value(&self, target: NamedId, ty: &Type, visited: &mut FxHashSet<NamedId>) -> bool {
        match ty {
            Type::Named(named_ref) => {
                if named_ref.id == target {
                    return true;
                }
                visited.insert(named_ref.id)
                    && self.contains_by_value(target, &self.table.underlying(ty), visited)
            }
            Type::Array { elem, .. } => self.contains_by_value(target, elem, visited),
            Type::Struct(fields) => fields
                .iter()
                .any(|field| self.contains_by_value(target, &field.ty, visited)),
            _ => false,
        }
    }

    fn resolve_qualified(&mut self, node: Node<'f>, args: Vec<Type>) -> Result<Type, ResolveError> {
        let package_node = self.required_field(node, "package")?;
        let name_node = self.required_field(node, "name")?;
        let qualifier = self.text(package_node);
        let Some(import) = self.imports.lookup(qualifier) else {
            let (path, line, column) = self.location(package_node);
            return Err(ResolveError::UndefinedPackage {
                path,
                line,
                column,
                qualifier: qualifier.to_string(),
            });
        };
        let package_path = import.path.clone();
        let ty = self.external_type(&package_path, self.text(name_node));
        Ok(match ty {
            Type::External(mut external) if !args.is_empty() => {
                let rendered: Vec<String> = args
                    .iter()
                    .map(|arg| crate::types::type_string(arg, &self.table))
                    .collect();
                external.name = format!("{}[{}]", external.name, rendered.join(", "));
                Type::External(external)
            }
            other => other,
        })
    }

    /// A type from an imported package. Its underlying type is known only
    /// for `unsafe.Pointer`, configured types and the well-known table.
    fn external_type(&self, package_path: &str, name: &str) -> Type {
        if package_path == "unsafe" && name == "Pointer" {
            return Type::Basic(BasicKind::UnsafePointer);
        }
        let underlying = self
            .config
            .external_type(package_path, name)
            .or_else(|| external::lookup(package_path, name))
            .and_then(|kind| match kind {
                "error" => Some(Type::named(ERROR_ID)),
                basic => BasicKind::from_name(basic).map(Type::Basic),
            });
        Type::External(ExternalType {
            package_path: package_path.to_string(),
            name: name.to_string(),
            underlying: underlying.map(Box::new),
        })
    }

    fn resolve_generic(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        let base = self.required_field(node, "type")?;
        let mut args = Vec::new();
        if let Some(list) = node.child_by_field_name("type_arguments") {
            for arg in named_children(list) {
                args.push(self.resolve_type(arg)?);
            }
        }
        if base.kind() == "qualified_type" {
            return self.resolve_qualified(base, args);
        }

        let name = self.text(base);
        let base_type = self.resolve_type_name(base)?;
        match base_type {
            Type::Named(named_ref) if named_ref.args.is_empty() => {
                let expected = self.table.get(named_ref.id).type_params.len();
                if expected != args.len() {
                    let (path, line, column) = self.location(node);
                    return Err(ResolveError::TypeArgumentCount {
                        path,
                        line,
                        column,
                        name: name.to_string(),
                        expected,
                        actual: args.len(),
                    });
                }
                Ok(Type::Named(NamedRef {
                    id: named_ref.id,
                    args,
                }))
            }
            // Generic aliases are instantiated by their target already.
            _ if matches!(
                self.scope.get(name),
                Some(PackageObject::Type { alias: true, .. })
            ) =>
            {
                Ok(base_type)
            }
            _ => {
                let (path, line, column) = self.location(node);
                Err(ResolveError::TypeArgumentCount {
                    path,
                    line,
                    column,
                    name: name.to_string(),
                    expected: 0,
                    actual: args.len(),
                })
            }
        }
    }

    /// Enter the names of a type parameter list into scope, then resolve
    /// their constraints (which may refer to each other).
    pub(super) fn resolve_type_params(&mut self, list: Node<'f>) -> Result<Vec<TypeParam>, ResolveError> {
        let decls: Vec<Node<'f>> = named_children(list)
            .into_iter()
            .filter(|n| n.kind() == "type_parameter_declaration")
            .collect();
        for decl in &decls {
            for name_node in field_children(*decl, "name") {
                self.type_params.push(self.text(name_node).to_string());
            }
        }
        let mut params = Vec::new();
        for decl in decls {
            let constraint = match decl.child_by_field_name("type") {
                Some(constraint_node) => self.resolve_type(constraint_node)?,
                None => Type::empty_interface(),
            };
            for name_node in field_children(decl, "name") {
                params.push(TypeParam {
                    name: self.text(name_node).to_string(),
                    constraint: constraint.clone(),
                });
            }
        }
        Ok(params)
    }

    /// A type element: one type, or a union of (possibly `~`) terms.
    fn resolve_type_elem(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        let children = named_children(node);
        if let [single] = children.as_slice() {
            if single.kind() != "negated_type" {
                return self.resolve_type(*single);
            }
        }
        let mut terms = Vec::new();
        for child in children {
            terms.push(self.resolve_term(child)?);
        }
        Ok(Type::Interface(InterfaceType {
            embeddeds: vec![Embedded::Union(terms)],
            ..InterfaceType::default()
        }))
    }

    fn resolve_term(&mut self, node: Node<'f>) -> Result<Term, ResolveError> {
        if node.kind() == "negated_type" {
            let inner = self.first_named_child(node)?;
            return Ok(Term {
                tilde: true,
                ty: self.resolve_type(inner)?,
            });
        }
        Ok(Term {
            tilde: false,
            ty: self.resolve_type(node)?,
        })
    }

    fn resolve_struct(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        let mut fields = Vec::new();
        let Some(list) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return Ok(Type::Struct(fields));
        };
        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let type_node = self.required_field(decl, "type")?;
            let mut ty = self.resolve_type(type_node)?;
            let tag = decl
                .child_by_field_name("tag")
                .map(|tag_node| unquote(self.text(tag_node)));
            let names = field_children(decl, "name");
            if names.is_empty() {
                if has_token(decl, "*") {
                    ty = Type::Pointer(Box::new(ty));
                }
                fields.push(Field {
                    name: self.embedded_field_name(type_node),
                    ty,
                    embedded: true,
                    tag,
                });
                continue;
            }
            for name_node in names {
                fields.push(Field {
                    name: self.text(name_node).to_string(),
                    ty: ty.clone(),
                    embedded: false,
                    tag: tag.clone(),
                });
            }
        }
        Ok(Type::Struct(fields))
    }

    fn embedded_field_name(&self, type_node: Node<'f>) -> String {
        let base = match type_node.kind() {
            "generic_type" => type_node.child_by_field_name("type").unwrap_or(type_node),
            _ => type_node,
        };
        let name_node = match base.kind() {
            "qualified_type" => base.child_by_field_name("name").unwrap_or(base),
            _ => base,
        };
        self.text(name_node).to_string()
    }

    fn resolve_interface(&mut self, node: Node<'f>) -> Result<Type, ResolveError> {
        let mut iface = InterfaceType::default();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name_node = self.required_field(elem, "name")?;
                    let signature = self.resolve_signature_parts(elem)?;
                    let name = self.text(name_node).to_string();
                    self.definitions.push(Definition::Func(FuncDef {
                        name: name.clone(),
                        signature: signature.clone(),
                        position: SourcePosition::from_ts_node(&name_node),
                        scope: DefinitionScope::InterfaceMethod,
                    }));
                    iface.methods.push(Method { name, signature });
                }
                "type_elem" | "constraint_elem" => {
                    let children = named_children(elem);
                    match children.as_slice() {
                        [single] if single.kind() != "negated_type" => {
                            let ty = self.resolve_type(*single)?;
                            iface.embeddeds.push(Embedded::Type(ty));
                        }
                        _ => {
                            let mut terms = Vec::new();
                            for child in children {
                                terms.push(self.resolve_term(child)?);
                            }
                            iface.embeddeds.push(Embedded::Union(terms));
                        }
                    }
                }
                _ => {
                    let ty = self.resolve_type(elem)?;
                    iface.embeddeds.push(Embedded::Type(ty));
                }
            }
        }
        iface.methods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Type::Interface(iface))
    }

    fn array_len(&self, node: Node<'f>) -> ArrayLen {
        let evaluated = match node.kind() {
            "int_literal" => parse_int_literal(self.text(node)),
            "identifier" => match self.scope.get(self.text(node)) {
                Some(PackageObject::Const { value: Some(value) }) if value.kind() == "int_literal" => {
                    parse_int_literal(self.text(*value))
                }
                _ => None,
            },
            "parenthesized_expression" => {
                return named_children(node)
                    .first()
                    .map(|inner| self.array_len(*inner))
                    .unwrap_or_else(|| ArrayLen::Unevaluated(self.text(node).to_string()));
            }
            _ => None,
        };
        match evaluated {
            Some(n) => ArrayLen::Known(n),
            None => ArrayLen::Unevaluated(self.text(node).to_string()),
        }
    }

    pub(super) fn required_field(&self, node: Node<'f>, field: &str) -> Result<Node<'f>, ResolveError> {
        node.child_by_field_name(field)
            .ok_or_else(|| self.not_a_type(node))
    }

    fn first_named_child(&self, node: Node<'f>) -> Result<Node<'f>, ResolveError> {
        named_children(node)
            .first()
            .copied()
            .ok_or_else(|| self.not_a_type(node))
    }

    pub(super) fn not_a_type(&self, node: Node<'f>) -> ResolveError {
        let (path, line, column) = self.location(node);
        ResolveError::NotAType {
            path,
            line,
            column,
            name: self.text(node).to_string(),
        }
    }

    fn recursive_type(&self, node: Node<'f>, name: &str) -> ResolveError {
        let (path, line, column) = self.location(node);
        ResolveError::InvalidRecursiveType {
            path,
            line,
            column,
            name: name.to_string(),
        }
    }

    fn recursive_named(&self, id: NamedId) -> ResolveError {
        let name = self.table.get(id).name.clone();
        let node = self
            .named_specs
            .iter()
            .find(|(named_id, _)| *named_id == id)
            .map(|(_, node)| *node)
            .unwrap_or_else(|| self.file.root());
        self.recursive_type(node, &name)
    }
}

fn channel_direction(node: Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|child| !child.is_named())
        .map(|child| child.kind())
        .collect();
    match tokens.as_slice() {
        ["<-", "chan", ..] => ChanDir::Recv,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}
