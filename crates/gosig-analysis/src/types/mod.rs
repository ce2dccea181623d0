//! Go type model produced by the resolver.
//!
//! Types are plain values. Defined (named) types live in a [`TypeTable`]
//! arena and are referenced by id, which keeps recursive declarations such
//! as `type Node struct { next *Node }` finite.

pub mod basic;
pub mod display;
pub mod external;
pub mod universe;

pub use basic::BasicKind;
pub use display::type_string;

/// Index of a defined type in a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedId(pub u32);

/// A use of a defined type, with type arguments when it is generic.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRef {
    pub id: NamedId,
    pub args: Vec<Type>,
}

/// A type declared in an imported package.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalType {
    pub package_path: String,
    pub name: String,
    /// Known underlying type; `None` keeps the type opaque.
    pub underlying: Option<Box<Type>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    Known(u64),
    /// Length expression that could not be evaluated, kept as source text.
    Unevaluated(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub embedded: bool,
    pub tag: Option<String>,
}

/// A named parameter, result or receiver. `name` is empty when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Type,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub receiver: Option<Var>,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    /// The last parameter is `...T`; its type is stored as `[]T`.
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
}

/// One term of a union element in a constraint interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub tilde: bool,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    Type(Type),
    Union(Vec<Term>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceType {
    /// Explicitly declared methods, sorted by name.
    pub methods: Vec<Method>,
    pub embeddeds: Vec<Embedded>,
    /// The predeclared `comparable` constraint.
    pub comparable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicKind),
    Named(NamedRef),
    External(ExternalType),
    TypeParam(String),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array { len: ArrayLen, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(Box<Signature>),
    Struct(Vec<Field>),
    Interface(InterfaceType),
    /// Placeholder for a defined type whose underlying type is still being
    /// resolved. Never escapes the resolver.
    Invalid,
}

impl Type {
    pub fn named(id: NamedId) -> Type {
        Type::Named(NamedRef { id, args: Vec::new() })
    }

    pub fn empty_interface() -> Type {
        Type::Interface(InterfaceType::default())
    }
}

/// A defined type: `type Name[P any] underlying`.
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
    /// Qualifier used when printing. Empty for predeclared types.
    pub package: String,
    pub type_params: Vec<TypeParam>,
    /// `None` while the declaration is being resolved.
    pub underlying: Option<Type>,
}

/// Arena of defined types for one file.
#[derive(Debug, Clone)]
pub struct TypeTable {
    named: Vec<NamedType>,
}

/// Predeclared `error`.
pub const ERROR_ID: NamedId = NamedId(0);
/// Predeclared `comparable`.
pub const COMPARABLE_ID: NamedId = NamedId(1);

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        let error_method = Method {
            name: "Error".to_string(),
            signature: Signature {
                results: vec![Var {
                    name: String::new(),
                    ty: Type::Basic(BasicKind::String),
                }],
                ..Signature::default()
            },
        };
        let error = NamedType {
            name: "error".to_string(),
            package: String::new(),
            type_params: Vec::new(),
            underlying: Some(Type::Interface(InterfaceType {
                methods: vec![error_method],
                ..InterfaceType::default()
            })),
        };
        let comparable = NamedType {
            name: "comparable".to_string(),
            package: String::new(),
            type_params: Vec::new(),
            underlying: Some(Type::Interface(InterfaceType {
                comparable: true,
                ..InterfaceType::default()
            })),
        };
        Self {
            named: vec![error, comparable],
        }
    }

    /// Reserve an entry for a defined type; the underlying type is filled in
    /// later with [`TypeTable::set_underlying`].
    pub fn declare(&mut self, name: &str, package: &str) -> NamedId {
        let id = NamedId(self.named.len() as u32);
        self.named.push(NamedType {
            name: name.to_string(),
            package: package.to_string(),
            type_params: Vec::new(),
            underlying: None,
        });
        id
    }

    pub fn set_type_params(&mut self, id: NamedId, type_params: Vec<TypeParam>) {
        self.named[id.0 as usize].type_params = type_params;
    }

    pub fn set_underlying(&mut self, id: NamedId, underlying: Type) {
        self.named[id.0 as usize].underlying = Some(underlying);
    }

    pub fn get(&self, id: NamedId) -> &NamedType {
        &self.named[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// The type with every named, alias and known external layer stripped.
    ///
    /// Opaque external types and type parameters are their own underlying
    /// type here; neither is ever basic or an interface we can inspect.
    pub fn underlying(&self, ty: &Type) -> Type {
        match ty {
            Type::Named(named_ref) => {
                let named = self.get(named_ref.id);
                let underlying = named.underlying.clone().unwrap_or(Type::Invalid);
                if named_ref.args.is_empty() {
                    underlying
                } else {
                    substitute(&underlying, &named.type_params, &named_ref.args)
                }
            }
            Type::External(ExternalType {
                underlying: Some(underlying),
                ..
            }) => self.underlying(underlying),
            other => other.clone(),
        }
    }
}

/// Replace type parameters by the matching type arguments.
pub fn substitute(ty: &Type, params: &[TypeParam], args: &[Type]) -> Type {
    let sub = |t: &Type| substitute(t, params, args);
    match ty {
        Type::TypeParam(name) => params
            .iter()
            .position(|p| &p.name == name)
            .and_then(|i| args.get(i))
            .cloned()
            .unwrap_or_else(|| ty.clone()),
        Type::Named(named_ref) => Type::Named(NamedRef {
            id: named_ref.id,
            args: named_ref.args.iter().map(sub).collect(),
        }),
        Type::Pointer(elem) => Type::Pointer(Box::new(sub(elem))),
        Type::Slice(elem) => Type::Slice(Box::new(sub(elem))),
        Type::Array { len, elem } => Type::Array {
            len: len.clone(),
            elem: Box::new(sub(elem)),
        },
        Type::Map { key, value } => Type::Map {
            key: Box::new(sub(key)),
            value: Box::new(sub(value)),
        },
        Type::Chan { dir, elem } => Type::Chan {
            dir: *dir,
            elem: Box::new(sub(elem)),
        },
        Type::Func(sig) => Type::Func(Box::new(substitute_signature(sig, params, args))),
        Type::Struct(fields) => Type::Struct(
            fields
                .iter()
                .map(|f| Field {
                    name: f.name.clone(),
                    ty: sub(&f.ty),
                    embedded: f.embedded,
                    tag: f.tag.clone(),
                })
                .collect(),
        ),
        Type::Interface(iface) => Type::Interface(InterfaceType {
            methods: iface
                .methods
                .iter()
                .map(|m| Method {
                    name: m.name.clone(),
                    signature: substitute_signature(&m.signature, params, args),
                })
                .collect(),
            embeddeds: iface
                .embeddeds
                .iter()
                .map(|e| match e {
                    Embedded::Type(t) => Embedded::Type(sub(t)),
                    Embedded::Union(terms) => Embedded::Union(
                        terms
                            .iter()
                            .map(|term| Term {
                                tilde: term.tilde,
                                ty: sub(&term.ty),
                            })
                            .collect(),
                    ),
                })
                .collect(),
            comparable: iface.comparable,
        }),
        Type::Basic(_) | Type::External(_) | Type::Invalid => ty.clone(),
    }
}

fn substitute_signature(sig: &Signature, params: &[TypeParam], args: &[Type]) -> Signature {
    let sub_vars = |vars: &[Var]| -> Vec<Var> {
        vars.iter()
            .map(|v| Var {
                name: v.name.clone(),
                ty: substitute(&v.ty, params, args),
            })
            .collect()
    };
    Signature {
        receiver: sig.receiver.as_ref().map(|r| Var {
            name: r.name.clone(),
            ty: substitute(&r.ty, params, args),
        }),
        type_params: sig.type_params.clone(),
        params: sub_vars(&sig.params),
        results: sub_vars(&sig.results),
        variadic: sig.variadic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_predeclared() {
        let table = TypeTable::new();
        assert_eq!(table.get(ERROR_ID).name, "error");
        match table.underlying(&Type::named(ERROR_ID)) {
            Type::Interface(iface) => {
                assert_eq!(iface.methods.len(), 1);
                assert_eq!(iface.methods[0].name, "Error");
            }
            other => panic!("unexpected underlying {other:?}"),
        }
    }

    #[test]
    fn underlying_substitutes_type_arguments() {
        let mut table = TypeTable::new();
        let id = table.declare("Box", "main");
        table.set_type_params(
            id,
            vec![TypeParam {
                name: "T".into(),
                constraint: Type::empty_interface(),
            }],
        );
        table.set_underlying(id, Type::Slice(Box::new(Type::TypeParam("T".into()))));

        let instance = Type::Named(NamedRef {
            id,
            args: vec![Type::Basic(BasicKind::Int)],
        });
        assert_eq!(
            table.underlying(&instance),
            Type::Slice(Box::new(Type::Basic(BasicKind::Int)))
        );
    }

    #[test]
    fn known_external_is_transparent() {
        let table = TypeTable::new();
        let duration = Type::External(ExternalType {
            package_path: "time".into(),
            name: "Duration".into(),
            underlying: Some(Box::new(Type::Basic(BasicKind::Int64))),
        });
        assert_eq!(table.underlying(&duration), Type::Basic(BasicKind::Int64));
    }
}
