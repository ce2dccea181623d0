//! Function, method and function-type signatures.

use gosig_core::errors::ResolveError;
use tree_sitter::Node;

use super::definitions::{DefinitionScope, FuncDef};
use super::{field_children, named_children, PackageObject, Resolver};
use crate::parsers::SourcePosition;
use crate::types::{Signature, Type, Var};

impl<'f> Resolver<'f> {
    pub(super) fn resolve_function(&mut self, decl: Node<'f>) -> Result<FuncDef, ResolveError> {
        let name_node = self.required_field(decl, "name")?;
        let saved = std::mem::take(&mut self.type_params);
        let result = self.resolve_function_signature(decl);
        self.type_params = saved;
        Ok(FuncDef {
            name: self.text(name_node).to_string(),
            signature: result?,
            position: SourcePosition::from_ts_node(&name_node),
            scope: DefinitionScope::Package,
        })
    }

    fn resolve_function_signature(&mut self, decl: Node<'f>) -> Result<Signature, ResolveError> {
        let type_params = match decl.child_by_field_name("type_parameters") {
            Some(list) => self.resolve_type_params(list)?,
            None => Vec::new(),
        };
        let mut sig = self.resolve_signature_parts(decl)?;
        sig.type_params = type_params;
        Ok(sig)
    }

    /// Parameters and results of a declaration, method element or
    /// function type.
    pub(super) fn resolve_signature_parts(&mut self, node: Node<'f>) -> Result<Signature, ResolveError> {
        let (params, variadic) = match node.child_by_field_name("parameters") {
            Some(list) => self.resolve_parameter_list(list)?,
            None => (Vec::new(), false),
        };
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.resolve_parameter_list(result)?.0,
            Some(result) => vec![Var {
                name: String::new(),
                ty: self.resolve_type(result)?,
            }],
            None => Vec::new(),
        };
        Ok(Signature {
            receiver: None,
            type_params: Vec::new(),
            params,
            results,
            variadic,
        })
    }

    /// Flatten a parameter list into one [`Var`] per name. Returns whether
    /// the last parameter is variadic; its type is stored as a slice.
    fn resolve_parameter_list(&mut self, list: Node<'f>) -> Result<(Vec<Var>, bool), ResolveError> {
        let mut vars = Vec::new();
        let mut variadic = false;
        for decl in named_children(list) {
            let is_variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };
            let type_node = self.required_field(decl, "type")?;
            let mut ty = self.resolve_type(type_node)?;
            if is_variadic {
                ty = Type::Slice(Box::new(ty));
                variadic = true;
            }
            let names = field_children(decl, "name");
            if names.is_empty() {
                vars.push(Var {
                    name: String::new(),
                    ty,
                });
                continue;
            }
            for name_node in names {
                vars.push(Var {
                    name: self.text(name_node).to_string(),
                    ty: ty.clone(),
                });
            }
        }
        Ok((vars, variadic))
    }

    /// Resolve a method declaration. Returns the definition and the name of
    /// the receiver base type.
    pub(super) fn resolve_method(&mut self, decl: Node<'f>) -> Result<(FuncDef, String), ResolveError> {
        let name_node = self.required_field(decl, "name")?;
        let receiver_list = self.required_field(decl, "receiver")?;
        let Some(receiver_decl) = named_children(receiver_list)
            .into_iter()
            .find(|n| n.kind() == "parameter_declaration")
        else {
            return Err(self.not_a_type(receiver_list));
        };
        let receiver_type = self.required_field(receiver_decl, "type")?;

        let mut base = receiver_type;
        while matches!(base.kind(), "pointer_type" | "parenthesized_type") {
            base = match named_children(base).first() {
                Some(inner) => *inner,
                None => return Err(self.not_a_type(base)),
            };
        }

        let saved = std::mem::take(&mut self.type_params);
        let base_name_node = if base.kind() == "generic_type" {
            if let Some(args) = base.child_by_field_name("type_arguments") {
                for arg in named_children(args) {
                    let arg_name = named_children(arg).first().copied().unwrap_or(arg);
                    self.type_params.push(self.text(arg_name).to_string());
                }
            }
            base.child_by_field_name("type").unwrap_or(base)
        } else {
            base
        };
        let result = self.resolve_receiver_and_signature(decl, receiver_decl, receiver_type, base_name_node);
        self.type_params = saved;
        let signature = result?;

        let func = FuncDef {
            name: self.text(name_node).to_string(),
            signature,
            position: SourcePosition::from_ts_node(&name_node),
            scope: DefinitionScope::Package,
        };
        Ok((func, self.text(base_name_node).to_string()))
    }

    fn resolve_receiver_and_signature(
        &mut self,
        decl: Node<'f>,
        receiver_decl: Node<'f>,
        receiver_type: Node<'f>,
        base_name_node: Node<'f>,
    ) -> Result<Signature, ResolveError> {
        let base_name = self.text(base_name_node);
        match self.scope.get(base_name) {
            Some(PackageObject::Type { .. }) => {}
            Some(_) => return Err(self.not_a_type(base_name_node)),
            None => {
                let (path, line, column) = self.location(base_name_node);
                return Err(ResolveError::UndefinedType {
                    path,
                    line,
                    column,
                    name: base_name.to_string(),
                });
            }
        }
        let receiver_ty = self.resolve_type(receiver_type)?;
        let receiver_name = field_children(receiver_decl, "name")
            .first()
            .map(|n| self.text(*n).to_string())
            .unwrap_or_default();
        let mut sig = self.resolve_signature_parts(decl)?;
        sig.receiver = Some(Var {
            name: receiver_name,
            ty: receiver_ty,
        });
        Ok(sig)
    }
}
