//! File-scope import table.

use rustc_hash::FxHashMap;

use crate::parsers::SourcePosition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub path: String,
    pub position: SourcePosition,
}

/// Imports of one file, keyed by the name they are referred to by.
#[derive(Debug, Default)]
pub struct ImportTable {
    by_name: FxHashMap<String, ImportEntry>,
    dot_imports: Vec<String>,
}

/// Outcome of registering an import.
#[derive(Debug, PartialEq, Eq)]
pub enum ImportInsert {
    Added,
    Ignored,
    Duplicate,
}

impl ImportTable {
    /// Register `import alias "path"`. `alias` is `None` for plain imports.
    pub fn add(&mut self, alias: Option<&str>, path: &str, position: SourcePosition) -> ImportInsert {
        match alias {
            Some("_") => ImportInsert::Ignored,
            Some(".") => {
                self.dot_imports.push(path.to_string());
                ImportInsert::Added
            }
            alias => {
                let name = alias
                    .map(str::to_string)
                    .unwrap_or_else(|| default_package_name(path));
                if self.by_name.contains_key(&name) {
                    return ImportInsert::Duplicate;
                }
                self.by_name.insert(
                    name,
                    ImportEntry {
                        path: path.to_string(),
                        position,
                    },
                );
                ImportInsert::Added
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&ImportEntry> {
        self.by_name.get(name)
    }

    /// Import path an unqualified name may come from via `import . "path"`.
    pub fn dot_import(&self) -> Option<&str> {
        self.dot_imports.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len() + self.dot_imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Package name implied by an import path when no alias is given.
///
/// Uses the last path element, skipping a major-version suffix (`/v2`) and
/// trimming the conventional `go-` prefix, `-go` suffix and `.vN` suffix.
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }
    let mut name = last;
    if let Some((base, suffix)) = name.rsplit_once(".v") {
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            name = base;
        }
    }
    let name = name.strip_prefix("go-").unwrap_or(name);
    let name = name.strip_suffix("-go").unwrap_or(name);
    name.replace(['-', '.'], "_")
}

fn is_major_version(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}
