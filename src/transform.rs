//! The per-file rewrite: parse, bind, find free configured names, insert
//! imports, print.

use anyhow::{Context, Result};
use autoimport_binder::BinderState;
use autoimport_common::Diagnostic;
use autoimport_emitter::emit_source_file;
use autoimport_parser::{NodeArena, NodeIndex, ParseDiagnostic, ParserState};
use autoimport_scanner::SyntaxKind;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, debug_span, error, trace};

use crate::classifier::{is_bound, is_qualifying_use};
use crate::config::{AutoImportConfig, DEFAULT_EXCLUDE, DeclarationTable};
use crate::resolver::resolve;
use crate::synthesizer::{InsertionOrder, apply};

/// Decides which files the rewrite leaves alone.
pub trait FileFilter: Send + Sync {
    fn is_excluded(&self, file_name: &str) -> bool;
}

/// Excludes files matching any of a set of glob patterns.
#[derive(Debug, Clone)]
pub struct ExcludeGlobs {
    set: GlobSet,
}

impl ExcludeGlobs {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<ExcludeGlobs> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(
                Glob::new(pattern).with_context(|| format!("invalid exclude pattern `{pattern}`"))?,
            );
        }
        Ok(ExcludeGlobs {
            set: builder.build()?,
        })
    }
}

impl Default for ExcludeGlobs {
    fn default() -> ExcludeGlobs {
        let globs = ExcludeGlobs::new(DEFAULT_EXCLUDE);
        debug_assert!(globs.is_ok(), "built-in exclude patterns must compile");
        globs.unwrap_or_else(|err| {
            error!(error = %err, "built-in exclude patterns failed to compile; nothing is excluded");
            ExcludeGlobs {
                set: GlobSet::empty(),
            }
        })
    }
}

impl FileFilter for ExcludeGlobs {
    fn is_excluded(&self, file_name: &str) -> bool {
        let normalized = file_name.replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./");
        self.set.is_match(trimmed)
    }
}

/// Output of one file's rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub code: String,
    /// True when at least one import was added or extended.
    pub changed: bool,
    /// Parse errors. When non-empty the input is returned unchanged.
    pub diagnostics: Vec<Diagnostic>,
    /// The file matched the exclude filter.
    pub skipped: bool,
}

impl TransformResult {
    fn unchanged(source: &str) -> TransformResult {
        TransformResult {
            code: source.to_string(),
            changed: false,
            diagnostics: Vec::new(),
            skipped: false,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// A configured rewriter. Cheap to share across threads: every file gets
/// its own arena and scope tree.
pub struct AutoImport {
    table: DeclarationTable,
    order: InsertionOrder,
    filter: Box<dyn FileFilter>,
}

impl AutoImport {
    pub fn new(table: DeclarationTable) -> AutoImport {
        AutoImport {
            table,
            order: InsertionOrder::default(),
            filter: Box::new(ExcludeGlobs::default()),
        }
    }

    pub fn from_config(config: &AutoImportConfig) -> Result<AutoImport> {
        let table = config.declaration_table()?;
        let filter = ExcludeGlobs::new(&config.exclude_patterns())?;
        Ok(AutoImport::new(table)
            .with_insertion_order(config.insertion_order())
            .with_filter(filter))
    }

    pub fn with_insertion_order(mut self, order: InsertionOrder) -> AutoImport {
        self.order = order;
        self
    }

    pub fn with_filter(mut self, filter: impl FileFilter + 'static) -> AutoImport {
        self.filter = Box::new(filter);
        self
    }

    pub fn table(&self) -> &DeclarationTable {
        &self.table
    }

    pub fn insertion_order(&self) -> InsertionOrder {
        self.order
    }

    /// Rewrite `source`. `file_name` feeds `[name]` paths and the exclude
    /// filter; `None` means the file name is unknown.
    pub fn transform(&self, source: &str, file_name: Option<&str>) -> TransformResult {
        let _span = debug_span!("transform", file = file_name.unwrap_or("<unknown>")).entered();

        if file_name.is_some_and(|name| self.filter.is_excluded(name)) {
            debug!("excluded");
            return TransformResult {
                skipped: true,
                ..TransformResult::unchanged(source)
            };
        }
        if !self.table.is_configured() {
            debug!("no declarations configured");
            return TransformResult::unchanged(source);
        }

        let display_name = file_name.unwrap_or("<input>");
        let mut parser = ParserState::new(display_name.to_string(), source.to_string());
        let root = parser.parse_source_file();
        if !parser.get_diagnostics().is_empty() {
            let diagnostics = to_diagnostics(display_name, parser.get_diagnostics());
            debug!(errors = diagnostics.len(), "parse failed; leaving file untouched");
            return TransformResult {
                diagnostics,
                ..TransformResult::unchanged(source)
            };
        }
        let mut arena = parser.into_arena();

        let mut binder = BinderState::new();
        binder.bind_source_file(&arena, root);

        let changed = self.insert_imports(&mut arena, &mut binder, root, file_name);
        let code = if changed {
            emit_source_file(&arena, root)
        } else {
            source.to_string()
        };
        TransformResult {
            code,
            changed,
            diagnostics: Vec::new(),
            skipped: false,
        }
    }

    fn insert_imports(
        &self,
        arena: &mut NodeArena,
        binder: &mut BinderState,
        root: NodeIndex,
        file_name: Option<&str>,
    ) -> bool {
        let Some(module_scope) = binder.module_scope() else {
            return false;
        };
        let mut changed = false;

        for ident in identifiers_in_source_order(arena, root) {
            let Some(name) = arena.identifier_text(ident) else {
                continue;
            };
            if !self.table.mentions(name) || !is_qualifying_use(arena, ident) {
                continue;
            }
            let Some(scope) = binder.find_enclosing_scope(arena, ident) else {
                continue;
            };
            if is_bound(binder, name, scope) {
                trace!(name, "bound locally");
                continue;
            }

            let name = name.to_string();
            for import in resolve(&name, file_name, &self.table) {
                let outcome = apply(arena, root, &name, &import.path, import.kind, self.order);
                changed |= outcome.changed();
                if import.kind.binds_name() {
                    binder.declare_in_scope(module_scope, &name, ident);
                }
            }
        }
        changed
    }
}

/// Every identifier node under `root`, pre-order.
fn identifiers_in_source_order(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let identifier = SyntaxKind::Identifier as u16;
    let mut found = Vec::new();
    let mut stack = vec![root];
    let mut children = Vec::new();
    while let Some(node) = stack.pop() {
        if arena.kind_of(node) == Some(identifier) {
            found.push(node);
            continue;
        }
        children.clear();
        arena.for_each_child(node, &mut |child| children.push(child));
        stack.extend(children.iter().rev());
    }
    found
}

fn to_diagnostics(file_name: &str, parse_diagnostics: &[ParseDiagnostic]) -> Vec<Diagnostic> {
    parse_diagnostics
        .iter()
        .map(|d| Diagnostic::error(file_name, d.start, d.length, d.message.clone(), d.code))
        .collect()
}

/// Rewrite one file with a throwaway [`AutoImport`].
pub fn transform_source(
    source: &str,
    file_name: Option<&str>,
    config: &AutoImportConfig,
) -> Result<TransformResult> {
    Ok(AutoImport::from_config(config)?.transform(source, file_name))
}
