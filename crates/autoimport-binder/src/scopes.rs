//! Persistent scope tree built by the binder.

use autoimport_parser::NodeIndex;
use indexmap::IndexMap;

/// Index into `BinderState::scopes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == ScopeId::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != ScopeId::NONE
    }
}

impl Default for ScopeId {
    fn default() -> ScopeId {
        ScopeId::NONE
    }
}

/// What kind of syntax opened a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// The whole module.
    Module,
    /// Function, method, accessor, constructor or arrow function.
    Function,
    /// Block statement or `switch` body.
    Block,
    /// Head of `for`, `for-in` and `for-of`.
    For,
    /// `catch` clause, including its block.
    Catch,
    /// Class body; also holds the own name of a class expression.
    Class,
    /// `static { }` block inside a class.
    StaticBlock,
}

impl ContainerKind {
    /// Scopes that receive hoisted `var` declarations.
    #[inline]
    pub fn is_function_scope(self) -> bool {
        matches!(
            self,
            ContainerKind::Module | ContainerKind::Function | ContainerKind::StaticBlock
        )
    }
}

/// Names declared in one scope, in declaration order, mapped to the
/// node that introduced them.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    names: IndexMap<String, NodeIndex>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// Record `name`. The first declaration wins when a name is redeclared.
    pub fn set(&mut self, name: String, declaration: NodeIndex) {
        self.names.entry(name).or_insert(declaration);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }
}

/// One frame of the scope chain.
#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ContainerKind,
    pub table: SymbolTable,
    pub container_node: NodeIndex,
}

impl Scope {
    pub fn new(parent: ScopeId, kind: ContainerKind, container_node: NodeIndex) -> Scope {
        Scope {
            parent,
            kind,
            table: SymbolTable::new(),
            container_node,
        }
    }
}
