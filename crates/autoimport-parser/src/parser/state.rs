//! Parser state - token handling, diagnostics and shared helpers.
//!
//! `ParserState` is a recursive-descent parser for ECMAScript modules. It
//! produces a `NodeArena` whose root is a `SourceFile` node. The parser never
//! gives up on a file: it reports a `ParseDiagnostic` and resynchronizes, so
//! callers can decide whether a file with errors is still usable.

use super::base::NodeIndex;
use super::node::{IdentifierData, LiteralData, NodeArena};
use super::flags::syntax_kind_ext;
use autoimport_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use autoimport_common::limits::MAX_PARSER_RECURSION_DEPTH;
use autoimport_scanner::{ScannerState, SyntaxKind, is_contextual_keyword, token_to_text};
use serde::Serialize;
use tracing::trace;

pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
/// `in` is not a binary operator here (the head of a `for` statement).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 2;
pub const CONTEXT_FLAG_IN_CLASS: u32 = 1 << 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) context_flags: u32,
    pub(crate) current_token: SyntaxKind,
    /// End of the last consumed token; the end position of nodes being finished.
    pub(crate) prev_token_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let arena = NodeArena::with_capacity_for_text(source_text.len());
        ParserState {
            scanner: ScannerState::new(source_text),
            arena,
            file_name,
            // Module code: top-level `await` is an operator.
            context_flags: CONTEXT_FLAG_ASYNC,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    pub(crate) fn node_end(&self) -> u32 {
        self.prev_token_end
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) fn re_scan_slash_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_slash_token();
        self.current_token
    }

    pub(crate) fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_template_token();
        self.current_token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, reporting `'x' expected.` when it is missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = token_to_text(kind).unwrap_or("token");
        self.parse_error_at_current_token(
            &format_message(diagnostic_messages::TOKEN_EXPECTED, &[text]),
            diagnostic_codes::TOKEN_EXPECTED,
        );
        false
    }

    /// Run `f` and rewind the scanner afterwards. `f` must not create nodes.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let diagnostics_len = self.parse_diagnostics.len();
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        self.parse_diagnostics.truncate(diagnostics_len);
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    /// Automatic semicolon insertion: `;`, `}`, end of file, or a line break.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    // =========================================================================
    // Context
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `set` flags added and `clear` flags removed.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut ParserState) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Enter a nested construct. Returns false (and reports once) when the
    /// nesting limit is exceeded; the caller must not recurse further.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            if !self
                .parse_diagnostics
                .iter()
                .any(|d| d.code == diagnostic_codes::NESTING_TOO_DEEP)
            {
                self.parse_error_at_current_token(
                    diagnostic_messages::NESTING_TOO_DEEP,
                    diagnostic_codes::NESTING_TOO_DEEP,
                );
            }
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One diagnostic per position keeps cascading errors out of the output.
        if self.parse_diagnostics.last().is_some_and(|d| d.start == start) {
            return;
        }
        trace!(file = %self.file_name, start, code, message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn error_expression_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::EXPRESSION_EXPECTED,
            diagnostic_codes::EXPRESSION_EXPECTED,
        );
    }

    pub(crate) fn error_identifier_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
    }

    /// Fold scanner diagnostics into the parse diagnostics, ordered by position.
    pub(crate) fn merge_scanner_diagnostics(&mut self) {
        for diag in self.scanner.get_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
        self.parse_diagnostics
            .dedup_by(|a, b| a.start == b.start && a.code == b.code);
    }

    // =========================================================================
    // Identifiers and names
    // =========================================================================

    /// Whether the current token can be used as a binding or reference identifier.
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::AwaitKeyword => !self.in_context(CONTEXT_FLAG_ASYNC),
            SyntaxKind::YieldKeyword => !self.in_context(CONTEXT_FLAG_GENERATOR),
            kind => is_contextual_keyword(kind),
        }
    }

    /// Identifier, keyword or private identifier usable as a property name.
    pub(crate) fn is_identifier_name(&self) -> bool {
        let kind = self.token();
        kind == SyntaxKind::PrivateIdentifier || autoimport_scanner::is_identifier_or_keyword(kind)
    }

    fn create_identifier_from_token(&mut self, kind: SyntaxKind) -> NodeIndex {
        let start = self.token_pos();
        let end = self.token_end();
        let escaped_text = self.scanner.token_value().to_string();
        self.next_token();
        self.arena
            .add_identifier(kind as u16, start, end, IdentifierData { escaped_text })
    }

    /// A node standing in for a missing identifier; has empty text.
    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        )
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.create_identifier_from_token(SyntaxKind::Identifier);
        }
        self.error_identifier_expected();
        self.create_missing_identifier()
    }

    /// Identifier after `.`, or a member name: keywords are allowed.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.create_identifier_from_token(SyntaxKind::PrivateIdentifier);
        }
        if self.is_identifier_name() {
            return self.create_identifier_from_token(SyntaxKind::Identifier);
        }
        self.error_identifier_expected();
        self.create_missing_identifier()
    }

    pub(crate) fn parse_literal_token(&mut self) -> NodeIndex {
        let kind = self.token();
        let start = self.token_pos();
        let end = self.token_end();
        let text = match kind {
            SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail => self.scanner.token_value().to_string(),
            _ => self.scanner.token_text().to_string(),
        };
        self.next_token();
        self.arena
            .add_literal(kind as u16, start, end, LiteralData { text })
    }

    pub(crate) fn parse_string_literal(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            return self.parse_literal_token();
        }
        self.parse_error_at_current_token(
            diagnostic_messages::STRING_LITERAL_EXPECTED,
            diagnostic_codes::STRING_LITERAL_EXPECTED,
        );
        NodeIndex::NONE
    }

    /// Identifier or string literal, as used in import/export specifiers.
    pub(crate) fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal_token()
        } else {
            self.parse_identifier_name()
        }
    }

    /// Whether the current token can start a property name.
    pub(crate) fn is_property_name_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        ) || self.is_identifier_name()
    }

    /// Property name in an object literal, class body or binding pattern.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal_token()
            }
            SyntaxKind::OpenBracketToken => {
                let start = self.token_pos();
                self.next_token();
                let expression =
                    self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_assignment_expression());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                let end = self.node_end();
                self.arena.add_wrapped_expr(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start,
                    end,
                    super::node::ExprWrapperData { expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }
}
