//! Binder state: the persistent scope tree and lookups over it.

use crate::{ContainerKind, Scope, ScopeId};
use autoimport_common::limits::{MAX_PARENT_WALK_ITERATIONS, MAX_SCOPE_WALK_ITERATIONS};
use autoimport_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Scope tree of one source file.
#[derive(Debug, Default)]
pub struct BinderState {
    /// Every scope of the file; `ScopeId(0)` is the module scope.
    pub scopes: Vec<Scope>,
    /// Scope-creating node index to the scope it opened.
    pub node_scope_ids: FxHashMap<u32, ScopeId>,
    pub(crate) current_scope_id: ScopeId,
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            scopes: Vec::new(),
            node_scope_ids: FxHashMap::default(),
            current_scope_id: ScopeId::NONE,
        }
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            return None;
        }
        self.scopes.get(id.0 as usize)
    }

    /// The module scope, once a file has been bound.
    pub fn module_scope(&self) -> Option<ScopeId> {
        (!self.scopes.is_empty()).then_some(ScopeId(0))
    }

    /// Find the scope enclosing `node` by walking up parent links to the
    /// nearest scope-creating ancestor (or `node` itself).
    pub fn find_enclosing_scope(&self, arena: &NodeArena, node: NodeIndex) -> Option<ScopeId> {
        let mut current = node;
        let mut iterations = 0usize;
        while current.is_some() && iterations < MAX_PARENT_WALK_ITERATIONS {
            if let Some(&scope_id) = self.node_scope_ids.get(&current.0) {
                return Some(scope_id);
            }
            current = arena.get_parent(current);
            iterations += 1;
        }
        self.module_scope()
    }

    /// The innermost scope, starting at `scope`, that declares `name`.
    pub fn resolve(&self, name: &str, scope: ScopeId) -> Option<ScopeId> {
        let mut current = scope;
        let mut iterations = 0usize;
        while let Some(frame) = self.scope(current) {
            if iterations >= MAX_SCOPE_WALK_ITERATIONS {
                trace!(name, "scope walk limit reached");
                return None;
            }
            if frame.table.has(name) {
                return Some(current);
            }
            current = frame.parent;
            iterations += 1;
        }
        None
    }

    /// Whether `name` is declared in `scope` or any scope enclosing it.
    #[inline]
    pub fn is_bound(&self, name: &str, scope: ScopeId) -> bool {
        self.resolve(name, scope).is_some()
    }

    /// Register a binding after binding has finished, e.g. the local name of
    /// a synthesized import. Returns false when `scope` does not exist.
    pub fn declare_in_scope(&mut self, scope: ScopeId, name: &str, declaration: NodeIndex) -> bool {
        if scope.is_none() {
            return false;
        }
        match self.scopes.get_mut(scope.0 as usize) {
            Some(frame) => {
                frame.table.set(name.to_string(), declaration);
                true
            }
            None => false,
        }
    }

    // Scope management during binding

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, node: NodeIndex) {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(self.current_scope_id, kind, node));
        if node.is_some() {
            self.node_scope_ids.insert(node.0, id);
        }
        self.current_scope_id = id;
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(frame) = self.scope(self.current_scope_id) {
            self.current_scope_id = frame.parent;
        }
    }

    /// Declare a lexical binding in the current scope.
    pub(crate) fn declare_lexical(&mut self, name: &str, declaration: NodeIndex) {
        let scope = self.current_scope_id;
        self.declare_in_scope(scope, name, declaration);
    }

    /// Declare a `var` binding in the nearest function or module scope.
    pub(crate) fn declare_hoisted(&mut self, name: &str, declaration: NodeIndex) {
        let mut current = self.current_scope_id;
        let mut iterations = 0usize;
        while let Some(frame) = self.scope(current) {
            if frame.kind.is_function_scope() || iterations >= MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            current = frame.parent;
            iterations += 1;
        }
        self.declare_in_scope(current, name, declaration);
    }
}
