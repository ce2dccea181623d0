//! Well-known imported types whose underlying kind is fixed.
//!
//! Only the standard library's defined scalar types are listed. Anything
//! else from an import stays opaque unless configuration names it.

/// `(import path, type name, underlying kind name)`.
const WELL_KNOWN: &[(&str, &str, &str)] = &[
    ("time", "Duration", "int64"),
    ("time", "Month", "int"),
    ("time", "Weekday", "int"),
    ("os", "FileMode", "uint32"),
    ("io/fs", "FileMode", "uint32"),
    ("reflect", "Kind", "uint"),
    ("reflect", "ChanDir", "int"),
    ("syscall", "Signal", "int"),
    ("net/http", "ConnState", "int"),
    ("math/big", "Word", "uint"),
    ("math/big", "Accuracy", "int8"),
    ("math/big", "RoundingMode", "uint8"),
    ("log/slog", "Level", "int"),
    ("go/token", "Pos", "int"),
    ("go/token", "Token", "int"),
    ("crypto", "Hash", "uint"),
    ("encoding/json", "Number", "string"),
    ("html/template", "HTML", "string"),
    ("html/template", "JS", "string"),
    ("html/template", "URL", "string"),
];

/// Underlying kind name of a well-known imported type.
pub fn lookup(package_path: &str, name: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(path, type_name, _)| *path == package_path && *type_name == name)
        .map(|(_, _, underlying)| *underlying)
}
