//! Text-preserving emitter for the autoimport rewriter.
//!
//! Import declarations created or extended by the rewriter are printed;
//! everything else is copied byte for byte from the original source.

pub mod printer;
pub mod source_file;
pub mod source_writer;

pub use printer::{Printer, quote_string};
pub use source_file::emit_source_file;
pub use source_writer::{NewLineKind, SourceWriter};
