//! Canonical textual form of types, following `go/types` conventions:
//! `[]int`, `map[string]bool`, `func(a int) (string, error)`,
//! `struct{X int; y string}`, `interface{Error() string}`, `<-chan int`.

use std::fmt::Write;

use super::{
    ArrayLen, ChanDir, Embedded, InterfaceType, Signature, Type, TypeTable, Var,
};

/// Render `ty` in canonical form. Defined types print as `pkg.Name`;
/// predeclared ones (`error`, `comparable`) print bare.
pub fn type_string(ty: &Type, table: &TypeTable) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, table);
    out
}

fn write_type(out: &mut String, ty: &Type, table: &TypeTable) {
    match ty {
        Type::Basic(kind) => out.push_str(kind.name()),
        Type::Named(named_ref) => {
            let named = table.get(named_ref.id);
            if !named.package.is_empty() {
                out.push_str(&named.package);
                out.push('.');
            }
            out.push_str(&named.name);
            write_type_list(out, &named_ref.args, table);
        }
        Type::External(external) => {
            out.push_str(&external.package_path);
            out.push('.');
            out.push_str(&external.name);
        }
        Type::TypeParam(name) => out.push_str(name),
        Type::Pointer(elem) => {
            out.push('*');
            write_type(out, elem, table);
        }
        Type::Slice(elem) => {
            out.push_str("[]");
            write_type(out, elem, table);
        }
        Type::Array { len, elem } => {
            match len {
                ArrayLen::Known(n) => {
                    let _ = write!(out, "[{n}]");
                }
                ArrayLen::Unevaluated(expr) => {
                    let _ = write!(out, "[{expr}]");
                }
            }
            write_type(out, elem, table);
        }
        Type::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, table);
            out.push(']');
            write_type(out, value, table);
        }
        Type::Chan { dir, elem } => {
            let (prefix, parens) = match dir {
                ChanDir::Both => (
                    "chan ",
                    matches!(**elem, Type::Chan { dir: ChanDir::Recv, .. }),
                ),
                ChanDir::Send => ("chan<- ", false),
                ChanDir::Recv => ("<-chan ", false),
            };
            out.push_str(prefix);
            if parens {
                out.push('(');
            }
            write_type(out, elem, table);
            if parens {
                out.push(')');
            }
        }
        Type::Func(sig) => {
            out.push_str("func");
            write_signature(out, sig, table);
        }
        Type::Struct(fields) => {
            out.push_str("struct{");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if !field.embedded {
                    out.push_str(&field.name);
                    out.push(' ');
                }
                write_type(out, &field.ty, table);
                if let Some(tag) = &field.tag {
                    let _ = write!(out, " {tag:?}");
                }
            }
            out.push('}');
        }
        Type::Interface(iface) => write_interface(out, iface, table),
        Type::Invalid => out.push_str("invalid type"),
    }
}

fn write_interface(out: &mut String, iface: &InterfaceType, table: &TypeTable) {
    out.push_str("interface{");
    let mut first = true;
    let mut sep = |out: &mut String| {
        if !first {
            out.push_str("; ");
        }
        first = false;
    };
    if iface.comparable {
        sep(out);
        out.push_str("comparable");
    }
    for method in &iface.methods {
        sep(out);
        out.push_str(&method.name);
        write_signature(out, &method.signature, table);
    }
    for embedded in &iface.embeddeds {
        sep(out);
        match embedded {
            Embedded::Type(ty) => write_type(out, ty, table),
            Embedded::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    if term.tilde {
                        out.push('~');
                    }
                    write_type(out, &term.ty, table);
                }
            }
        }
    }
    out.push('}');
}

fn write_type_list(out: &mut String, types: &[Type], table: &TypeTable) {
    if types.is_empty() {
        return;
    }
    out.push('[');
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(out, ty, table);
    }
    out.push(']');
}

fn write_signature(out: &mut String, sig: &Signature, table: &TypeTable) {
    write_tuple(out, &sig.params, sig.variadic, table);
    match sig.results.as_slice() {
        [] => {}
        [only] if only.name.is_empty() => {
            out.push(' ');
            write_type(out, &only.ty, table);
        }
        results => {
            out.push(' ');
            write_tuple(out, results, false, table);
        }
    }
}

fn write_tuple(out: &mut String, vars: &[Var], variadic: bool, table: &TypeTable) {
    out.push('(');
    for (i, var) in vars.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !var.name.is_empty() {
            out.push_str(&var.name);
            out.push(' ');
        }
        let is_last = i + 1 == vars.len();
        match &var.ty {
            Type::Slice(elem) if variadic && is_last => {
                out.push_str("...");
                write_type(out, elem, table);
            }
            ty => write_type(out, ty, table),
        }
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasicKind, Field, Method, Type, ERROR_ID};

    fn int() -> Type {
        Type::Basic(BasicKind::Int)
    }

    #[test]
    fn composite_types() {
        let table = TypeTable::new();
        let map = Type::Map {
            key: Box::new(Type::Basic(BasicKind::String)),
            value: Box::new(Type::Slice(Box::new(int()))),
        };
        assert_eq!(type_string(&map, &table), "map[string][]int");

        let array = Type::Array {
            len: ArrayLen::Known(4),
            elem: Box::new(Type::Pointer(Box::new(Type::Basic(BasicKind::Byte)))),
        };
        assert_eq!(type_string(&array, &table), "[4]*byte");
    }

    #[test]
    fn channel_directions() {
        let table = TypeTable::new();
        let recv = Type::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(int()),
        };
        assert_eq!(type_string(&recv, &table), "<-chan int");
        let nested = Type::Chan {
            dir: ChanDir::Both,
            elem: Box::new(recv),
        };
        assert_eq!(type_string(&nested, &table), "chan (<-chan int)");
    }

    #[test]
    fn error_interface_shape() {
        let table = TypeTable::new();
        let underlying = table.underlying(&Type::named(ERROR_ID));
        assert_eq!(type_string(&underlying, &table), "interface{Error() string}");
        assert_eq!(type_string(&Type::named(ERROR_ID), &table), "error");
    }

    #[test]
    fn function_signature_with_named_results_and_variadic() {
        let table = TypeTable::new();
        let sig = Signature {
            params: vec![
                Var {
                    name: "format".into(),
                    ty: Type::Basic(BasicKind::String),
                },
                Var {
                    name: "args".into(),
                    ty: Type::Slice(Box::new(Type::empty_interface())),
                },
            ],
            results: vec![
                Var {
                    name: "n".into(),
                    ty: int(),
                },
                Var {
                    name: "err".into(),
                    ty: Type::named(ERROR_ID),
                },
            ],
            variadic: true,
            ..Signature::default()
        };
        assert_eq!(
            type_string(&Type::Func(Box::new(sig)), &table),
            "func(format string, args ...interface{}) (n int, err error)"
        );
    }

    #[test]
    fn struct_and_interface_literals() {
        let table = TypeTable::new();
        let st = Type::Struct(vec![
            Field {
                name: "X".into(),
                ty: int(),
                embedded: false,
                tag: Some("json:\"x\"".into()),
            },
            Field {
                name: "error".into(),
                ty: Type::named(ERROR_ID),
                embedded: true,
                tag: None,
            },
        ]);
        assert_eq!(type_string(&st, &table), "struct{X int \"json:\\\"x\\\"\"; error}");

        let iface = Type::Interface(InterfaceType {
            methods: vec![Method {
                name: "Len".into(),
                signature: Signature {
                    results: vec![Var {
                        name: String::new(),
                        ty: int(),
                    }],
                    ..Signature::default()
                },
            }],
            embeddeds: vec![Embedded::Type(Type::named(ERROR_ID))],
            comparable: false,
        });
        assert_eq!(type_string(&iface, &table), "interface{Len() int; error}");
    }
}
