//! Inserting and merging import declarations into a program.

use autoimport_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::resolver::ImportKind;

/// Where brand-new import statements go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionOrder {
    /// Top of the program body, after the directive prologue. The most
    /// recently synthesized statement ends up first.
    #[default]
    Prepend,
    /// After the last import statement of the program, so synthesized
    /// statements keep encounter order.
    Append,
}

impl std::str::FromStr for InsertionOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<InsertionOrder, String> {
        match value.to_ascii_lowercase().as_str() {
            "prepend" => Ok(InsertionOrder::Prepend),
            "append" => Ok(InsertionOrder::Append),
            other => Err(format!("unknown insertion order `{other}` (expected prepend or append)")),
        }
    }
}

/// What `apply` did to the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new import statement was added.
    Inserted(NodeIndex),
    /// A specifier was added to an existing statement.
    Extended(NodeIndex),
    /// The import was already present.
    Unchanged,
}

impl ApplyOutcome {
    pub fn changed(self) -> bool {
        self != ApplyOutcome::Unchanged
    }
}

/// Import statements of one module path, with the facts merging needs.
struct ExistingImport {
    statement: NodeIndex,
    has_default: bool,
    has_namespace: bool,
}

/// Make `name` imported from `path` as `kind` in the program rooted at
/// `source_file`.
///
/// Anonymous imports are added once per path. Otherwise nothing happens
/// when a statement for `path` already binds `name`; a default specifier is
/// prepended to, and a member appended to, the first statement that can
/// take it; namespace imports always get their own statement.
pub fn apply(
    arena: &mut NodeArena,
    source_file: NodeIndex,
    name: &str,
    path: &str,
    kind: ImportKind,
    order: InsertionOrder,
) -> ApplyOutcome {
    let existing = collect_imports_for_path(arena, source_file, path);

    if kind == ImportKind::Anonymous {
        if !existing.is_empty() {
            return ApplyOutcome::Unchanged;
        }
        return insert_declaration(arena, source_file, Vec::new(), path, order);
    }

    if existing
        .iter()
        .any(|import| binds_local_name(arena, import.statement, name))
    {
        debug!(name, path, "already imported");
        return ApplyOutcome::Unchanged;
    }

    match kind {
        ImportKind::Default => {
            if let Some(import) = existing
                .iter()
                .find(|import| !import.has_default && !import.has_namespace)
            {
                let specifier = arena.create_import_default_specifier(name);
                if arena.add_specifier_to_import(import.statement, specifier, true) {
                    debug!(name, path, "default specifier merged");
                    return ApplyOutcome::Extended(import.statement);
                }
            }
            let specifier = arena.create_import_default_specifier(name);
            insert_declaration(arena, source_file, vec![specifier], path, order)
        }
        ImportKind::Member => {
            if let Some(import) = existing.iter().find(|import| !import.has_namespace) {
                let specifier = arena.create_import_specifier(name, name);
                if arena.add_specifier_to_import(import.statement, specifier, false) {
                    debug!(name, path, "member specifier merged");
                    return ApplyOutcome::Extended(import.statement);
                }
            }
            let specifier = arena.create_import_specifier(name, name);
            insert_declaration(arena, source_file, vec![specifier], path, order)
        }
        ImportKind::Namespace => {
            let specifier = arena.create_namespace_import(name);
            insert_declaration(arena, source_file, vec![specifier], path, order)
        }
        ImportKind::Anonymous => ApplyOutcome::Unchanged,
    }
}

fn collect_imports_for_path(
    arena: &NodeArena,
    source_file: NodeIndex,
    path: &str,
) -> SmallVec<[ExistingImport; 2]> {
    let mut found = SmallVec::new();
    let Some(file) = arena.get(source_file).and_then(|n| arena.get_source_file(n)) else {
        return found;
    };
    for statement in file.statements.iter() {
        let Some(import) = arena.get(statement).and_then(|n| arena.get_import_decl(n)) else {
            continue;
        };
        if arena.string_literal_text(import.module_specifier) != Some(path) {
            continue;
        }
        let mut has_default = false;
        let mut has_namespace = false;
        for specifier in import.specifiers.iter() {
            match arena.kind_of(specifier) {
                Some(syntax_kind_ext::IMPORT_DEFAULT_SPECIFIER) => has_default = true,
                Some(syntax_kind_ext::NAMESPACE_IMPORT) => has_namespace = true,
                _ => {}
            }
        }
        found.push(ExistingImport {
            statement,
            has_default,
            has_namespace,
        });
    }
    found
}

fn binds_local_name(arena: &NodeArena, statement: NodeIndex, name: &str) -> bool {
    let Some(import) = arena.get(statement).and_then(|n| arena.get_import_decl(n)) else {
        return false;
    };
    import.specifiers.iter().any(|specifier| {
        arena
            .get(specifier)
            .and_then(|n| arena.get_specifier(n))
            .and_then(|spec| arena.identifier_text(spec.name))
            == Some(name)
    })
}

fn insert_declaration(
    arena: &mut NodeArena,
    source_file: NodeIndex,
    specifiers: Vec<NodeIndex>,
    path: &str,
    order: InsertionOrder,
) -> ApplyOutcome {
    let position = insertion_position(arena, source_file, order);
    let declaration = arena.create_import_declaration(specifiers, path);
    if !arena.insert_statement(source_file, position, declaration) {
        return ApplyOutcome::Unchanged;
    }
    debug!(path, position, ?order, "import statement inserted");
    ApplyOutcome::Inserted(declaration)
}

fn insertion_position(arena: &NodeArena, source_file: NodeIndex, order: InsertionOrder) -> usize {
    match order {
        InsertionOrder::Prepend => 0,
        InsertionOrder::Append => {
            let Some(file) = arena.get(source_file).and_then(|n| arena.get_source_file(n)) else {
                return 0;
            };
            file.statements
                .nodes
                .iter()
                .rposition(|&stmt| arena.kind_of(stmt) == Some(syntax_kind_ext::IMPORT_DECLARATION))
                .map_or(0, |last| last + 1)
        }
    }
}
