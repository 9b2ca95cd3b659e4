//! ECMAScript module parser and arena AST for the autoimport rewriter.
//!
//! This crate provides:
//! - `NodeArena` - flat storage for every node of a file, with parent links
//! - `ParserState` - recursive-descent parser producing a `NodeArena`
//! - `syntax_kind_ext` / `node_flags` - node kinds and flags beyond scanner tokens

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{Node, NodeArena};
pub use parser::state::{ParseDiagnostic, ParserState};
pub use parser::{node_flags, syntax_kind_ext};
