//! Single-type classification: error contract detection, simplified
//! descriptions and representability.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::types::{display, BasicKind, Embedded, InterfaceType, Method, NamedId, Type, TypeTable};

/// Reported description of a parameter or result type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedType {
    pub name: String,
    #[serde(rename = "implementsError")]
    pub implements_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    Parameter,
    Result,
}

/// Whether the underlying type of `ty` is an interface whose complete
/// method set is exactly `Error() string`.
pub fn implements_error_contract(ty: &Type, table: &TypeTable) -> bool {
    let Type::Interface(iface) = table.underlying(ty) else {
        return false;
    };
    let mut methods = Vec::new();
    let mut visited = FxHashSet::default();
    if !collect_methods(&iface, table, &mut methods, &mut visited) {
        return false;
    }
    match methods.as_slice() {
        [method] => is_error_method(method),
        _ => false,
    }
}

/// Flatten the method set of `iface` into `out`. Returns `false` when the
/// interface carries type terms, `comparable`, or embeds a non-interface.
fn collect_methods(
    iface: &InterfaceType,
    table: &TypeTable,
    out: &mut Vec<Method>,
    visited: &mut FxHashSet<NamedId>,
) -> bool {
    if iface.comparable {
        return false;
    }
    for method in &iface.methods {
        if !out.iter().any(|m| m.name == method.name) {
            out.push(method.clone());
        }
    }
    for embedded in &iface.embeddeds {
        let Embedded::Type(embedded_ty) = embedded else {
            return false;
        };
        if let Type::Named(named_ref) = embedded_ty {
            if !visited.insert(named_ref.id) {
                continue;
            }
        }
        match table.underlying(embedded_ty) {
            Type::Interface(inner) => {
                if !collect_methods(&inner, table, out, visited) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

fn is_error_method(method: &Method) -> bool {
    let sig = &method.signature;
    method.name == "Error"
        && sig.params.is_empty()
        && !sig.variadic
        && matches!(
            sig.results.as_slice(),
            [result] if matches!(result.ty, Type::Basic(kind) if kind.identical(&BasicKind::String))
        )
}

/// Describe `ty` for the report: `"error"` for the error contract, the
/// canonical text of the underlying type otherwise.
pub fn simplify(ty: &Type, table: &TypeTable) -> SimplifiedType {
    if implements_error_contract(ty, table) {
        return SimplifiedType {
            name: "error".to_string(),
            implements_error: true,
        };
    }
    SimplifiedType {
        name: display::type_string(&table.underlying(ty), table),
        implements_error: false,
    }
}

/// Basic types are representable anywhere; the error contract only as a
/// result.
pub fn is_representable(ty: &Type, position: TypePosition, table: &TypeTable) -> bool {
    if matches!(table.underlying(ty), Type::Basic(_)) {
        return true;
    }
    position == TypePosition::Result && implements_error_contract(ty, table)
}
