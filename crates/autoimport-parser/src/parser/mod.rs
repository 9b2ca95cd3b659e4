//! Parser and AST.

pub mod base;
pub mod flags;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;

pub use base::{NodeIndex, NodeList};
pub use flags::{node_flags, syntax_kind_ext};
pub use state::ParserState;
