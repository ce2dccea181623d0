//! Definitions found in one file, keyed by kind.

use crate::parsers::SourcePosition;
use crate::types::{Signature, Type};

/// Where a function object was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionScope {
    /// A `func` or method declaration at file scope.
    Package,
    /// A method element inside an interface type literal.
    InterfaceMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub signature: Signature,
    pub position: SourcePosition,
    pub scope: DefinitionScope,
}

impl FuncDef {
    /// Only file-scope declarations can be selected for analysis.
    pub fn is_top_level(&self) -> bool {
        self.scope == DefinitionScope::Package
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueDef {
    pub name: String,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeNameDef {
    pub name: String,
    pub ty: Type,
    pub alias: bool,
    pub position: SourcePosition,
}

/// A resolved definition. Callers match on the kind they care about.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Func(FuncDef),
    Var(ValueDef),
    Const(ValueDef),
    TypeName(TypeNameDef),
}
