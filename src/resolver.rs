//! Matching identifier names against the declaration table.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::config::{Declaration, DeclarationTable, NAME_PLACEHOLDER};

/// How a matched name is imported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import name from "path"`
    Default,
    /// `import { name } from "path"`
    Member,
    /// `import * as name from "path"`
    Namespace,
    /// `import "path"`, for side effects only.
    Anonymous,
}

impl ImportKind {
    /// Whether the import introduces a local binding for the name.
    pub fn binds_name(self) -> bool {
        self != ImportKind::Anonymous
    }
}

/// One import a name asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportMatch {
    pub path: String,
    pub kind: ImportKind,
}

pub type ImportMatches = SmallVec<[ImportMatch; 2]>;

/// All imports `name` triggers, in declaration-table order. Within one
/// declaration the kinds are tested as default, member, anonymous, namespace.
pub fn resolve(name: &str, file_name: Option<&str>, table: &DeclarationTable) -> ImportMatches {
    let mut matches = ImportMatches::new();
    for declaration in table.iter() {
        let mut kinds: SmallVec<[ImportKind; 4]> = SmallVec::new();
        if declaration.default.as_deref() == Some(name) {
            kinds.push(ImportKind::Default);
        }
        if declaration.members.iter().any(|m| m == name) {
            kinds.push(ImportKind::Member);
        }
        if declaration.anonymous.iter().any(|a| a == name) {
            kinds.push(ImportKind::Anonymous);
        }
        if declaration.namespace.as_deref() == Some(name) {
            kinds.push(ImportKind::Namespace);
        }
        if kinds.is_empty() {
            continue;
        }

        let path = resolve_module_path(declaration, file_name);
        trace!(name, path = %path, ?kinds, "declaration matched");
        matches.extend(kinds.into_iter().map(|kind| ImportMatch {
            path: path.clone(),
            kind,
        }));
    }
    matches
}

/// The module specifier for `declaration` in the file `file_name`.
///
/// A `[name]` placeholder is replaced by the file's base name after one
/// replacement of the declaration's pattern (by default a trailing `.js` is
/// removed). Paths without the placeholder are returned unchanged.
pub fn resolve_module_path(declaration: &Declaration, file_name: Option<&str>) -> String {
    let Some(name_replace) = &declaration.name_replace else {
        return declaration.path.clone();
    };

    let base = match file_name.map(base_name) {
        Some(base) if !base.is_empty() => base,
        _ => {
            warn!(
                path = %declaration.path,
                "file name unknown; substituting an empty string for [name]"
            );
            ""
        }
    };

    let name = name_replace
        .pattern
        .replace(base, name_replace.replacement.as_str());
    declaration.path.replace(NAME_PLACEHOLDER, &name)
}

/// Final path component, extension kept.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}
