//! Lexical scope builder for the autoimport rewriter.
//!
//! The binder walks a parsed `NodeArena` once and records, for every
//! scope-creating node, the names declared in it. Lookups afterwards are
//! pure walks up the persistent scope tree.

pub mod scopes;
pub mod state;
mod state_binding;

pub use scopes::{ContainerKind, Scope, ScopeId, SymbolTable};
pub use state::BinderState;
