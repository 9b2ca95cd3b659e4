//! ECMAScript scanner/tokenizer for the autoimport rewriter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with snapshot/restore for look-ahead
//! - `char_codes` - Character classification utilities

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::{
    SyntaxKind, is_assignment_operator, is_contextual_keyword, is_identifier_or_keyword,
    is_keyword, is_reserved_word, text_to_keyword, token_to_text,
};

pub mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState, token_flags};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
