//! The predeclared (universe) scope.

use super::basic::BasicKind;

/// What a predeclared identifier denotes in type position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniverseType {
    Basic(BasicKind),
    /// The named `error` interface.
    Error,
    /// `any`, an alias for the empty interface.
    Any,
    /// The `comparable` constraint.
    Comparable,
}

pub fn lookup(name: &str) -> Option<UniverseType> {
    match name {
        "error" => Some(UniverseType::Error),
        "any" => Some(UniverseType::Any),
        "comparable" => Some(UniverseType::Comparable),
        _ => BasicKind::from_name(name).map(UniverseType::Basic),
    }
}

/// Predeclared identifiers that are values or functions, not types.
pub fn is_value(name: &str) -> bool {
    matches!(
        name,
        "true" | "false" | "iota" | "nil" | "append" | "cap" | "clear" | "close" | "complex"
            | "copy" | "delete" | "imag" | "len" | "make" | "max" | "min" | "new" | "panic"
            | "print" | "println" | "real" | "recover"
    )
}
