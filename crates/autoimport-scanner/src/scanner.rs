//! Scanner state machine.
//!
//! The scanner is pull-based: the parser calls [`ScannerState::scan`] for the
//! next token and asks for context-sensitive re-scans (`/` as a regular
//! expression, `}` as a template continuation) when the grammar requires it.
//! Look-ahead is done with [`ScannerState::save_state`] /
//! [`ScannerState::restore_state`].

use std::sync::Arc;

use autoimport_common::diagnostics::{diagnostic_codes, diagnostic_messages};

use crate::char_codes::{
    is_hex_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};

pub mod token_flags {
    pub const NONE: u32 = 0;
    /// A line terminator appeared between the previous token and this one.
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 0;
    /// String, template, regex or comment ran into end of input or a line break.
    pub const UNTERMINATED: u32 = 1 << 1;
    /// Identifier text contained a `\u` escape (never a keyword then).
    pub const UNICODE_ESCAPE: u32 = 1 << 2;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Everything needed to rewind the scanner to a previous token.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> ScannerState {
        ScannerState {
            text: Arc::from(text),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: token_flags::NONE,
            diagnostics: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: String) {
        *self = ScannerState::new(text);
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    // =========================================================================
    // Token accessors
    // =========================================================================

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, excluding leading trivia.
    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    /// Start of the current token, including leading trivia.
    #[inline]
    pub fn token_full_start(&self) -> usize {
        self.full_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Cooked value: identifier name, string contents, numeric or regex text.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    pub fn token_flags(&self) -> u32 {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        (self.token_flags & token_flags::PRECEDING_LINE_BREAK) != 0
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        (self.token_flags & token_flags::UNTERMINATED) != 0
    }

    #[inline]
    pub fn has_unicode_escape(&self) -> bool {
        (self.token_flags & token_flags::UNICODE_ESCAPE) != 0
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[inline]
    fn peek_char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.peek_char_at(self.pos)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }

    #[inline]
    fn rest_starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes()[self.pos..].starts_with(prefix)
    }

    fn error(&mut self, code: u32, message: &'static str, pos: usize, length: usize) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    /// Skip a `#!` line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.rest_starts_with(b"#!") {
            self.pos = self.find_line_end(2);
        }
    }

    fn find_line_end(&self, from: usize) -> usize {
        let start = self.pos + from;
        match memchr::memchr2(b'\n', b'\r', &self.bytes()[start..]) {
            Some(offset) => start + offset,
            None => self.text.len(),
        }
    }

    fn skip_multi_line_comment(&mut self) {
        let body_start = self.pos + 2;
        let body = &self.bytes()[body_start..];
        match memchr::memmem::find(body, b"*/") {
            Some(offset) => {
                let comment = &body[..offset];
                if memchr::memchr2(b'\n', b'\r', comment).is_some()
                    || self.text[body_start..body_start + offset]
                        .contains(['\u{2028}', '\u{2029}'])
                {
                    self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                }
                self.pos = body_start + offset + 2;
            }
            None => {
                self.error(
                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                    diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                    self.text.len(),
                    0,
                );
                self.pos = self.text.len();
            }
        }
    }

    // =========================================================================
    // Main scan
    // =========================================================================

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = token_flags::NONE;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.peek_char() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if is_line_break(ch) {
                self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            self.token = match ch {
                '/' => match self.byte_at(self.pos + 1) {
                    Some(b'/') => {
                        self.pos = self.find_line_end(2);
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_multi_line_comment();
                        continue;
                    }
                    Some(b'=') => self.advance_token(2, SyntaxKind::SlashEqualsToken),
                    _ => self.advance_token(1, SyntaxKind::SlashToken),
                },
                '\'' | '"' => self.scan_string(ch),
                '`' => {
                    self.pos += 1;
                    self.scan_template(true)
                }
                '0'..='9' => self.scan_number(),
                '.' if self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.scan_number()
                }
                '#' => self.scan_private_identifier(),
                '\\' => self.scan_identifier(),
                c if is_identifier_start(c) => self.scan_identifier(),
                _ => match self.scan_punctuation() {
                    Some(kind) => kind,
                    None => {
                        self.error(
                            diagnostic_codes::INVALID_CHARACTER,
                            diagnostic_messages::INVALID_CHARACTER,
                            self.pos,
                            ch.len_utf8(),
                        );
                        self.advance_token(ch.len_utf8(), SyntaxKind::Unknown)
                    }
                },
            };
            return self.token;
        }
    }

    #[inline]
    fn advance_token(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_punctuation(&mut self) -> Option<SyntaxKind> {
        use SyntaxKind::*;

        // Longest candidates first for each leading byte.
        let candidates: &[(&[u8], SyntaxKind)] = match self.byte_at(self.pos)? {
            b'{' => &[(b"{", OpenBraceToken)],
            b'}' => &[(b"}", CloseBraceToken)],
            b'(' => &[(b"(", OpenParenToken)],
            b')' => &[(b")", CloseParenToken)],
            b'[' => &[(b"[", OpenBracketToken)],
            b']' => &[(b"]", CloseBracketToken)],
            b';' => &[(b";", SemicolonToken)],
            b',' => &[(b",", CommaToken)],
            b'~' => &[(b"~", TildeToken)],
            b'@' => &[(b"@", AtToken)],
            b':' => &[(b":", ColonToken)],
            b'.' => &[(b"...", DotDotDotToken), (b".", DotToken)],
            b'?' => {
                // `?.5` is a conditional followed by a number, not optional chaining.
                if self.rest_starts_with(b"?.")
                    && !self.byte_at(self.pos + 2).is_some_and(|b| b.is_ascii_digit())
                {
                    return Some(self.advance_token(2, QuestionDotToken));
                }
                &[
                    (b"??=", QuestionQuestionEqualsToken),
                    (b"??", QuestionQuestionToken),
                    (b"?", QuestionToken),
                ]
            }
            b'<' => &[
                (b"<<=", LessThanLessThanEqualsToken),
                (b"<<", LessThanLessThanToken),
                (b"<=", LessThanEqualsToken),
                (b"<", LessThanToken),
            ],
            b'>' => &[
                (b">>>=", GreaterThanGreaterThanGreaterThanEqualsToken),
                (b">>>", GreaterThanGreaterThanGreaterThanToken),
                (b">>=", GreaterThanGreaterThanEqualsToken),
                (b">>", GreaterThanGreaterThanToken),
                (b">=", GreaterThanEqualsToken),
                (b">", GreaterThanToken),
            ],
            b'=' => &[
                (b"===", EqualsEqualsEqualsToken),
                (b"==", EqualsEqualsToken),
                (b"=>", EqualsGreaterThanToken),
                (b"=", EqualsToken),
            ],
            b'!' => &[
                (b"!==", ExclamationEqualsEqualsToken),
                (b"!=", ExclamationEqualsToken),
                (b"!", ExclamationToken),
            ],
            b'+' => &[
                (b"++", PlusPlusToken),
                (b"+=", PlusEqualsToken),
                (b"+", PlusToken),
            ],
            b'-' => &[
                (b"--", MinusMinusToken),
                (b"-=", MinusEqualsToken),
                (b"-", MinusToken),
            ],
            b'*' => &[
                (b"**=", AsteriskAsteriskEqualsToken),
                (b"**", AsteriskAsteriskToken),
                (b"*=", AsteriskEqualsToken),
                (b"*", AsteriskToken),
            ],
            b'%' => &[(b"%=", PercentEqualsToken), (b"%", PercentToken)],
            b'&' => &[
                (b"&&=", AmpersandAmpersandEqualsToken),
                (b"&&", AmpersandAmpersandToken),
                (b"&=", AmpersandEqualsToken),
                (b"&", AmpersandToken),
            ],
            b'|' => &[
                (b"||=", BarBarEqualsToken),
                (b"||", BarBarToken),
                (b"|=", BarEqualsToken),
                (b"|", BarToken),
            ],
            b'^' => &[(b"^=", CaretEqualsToken), (b"^", CaretToken)],
            _ => return None,
        };

        for &(text, kind) in candidates {
            if self.rest_starts_with(text) {
                return Some(self.advance_token(text.len(), kind));
            }
        }
        None
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_parts();
        if self.token_value.is_empty() {
            // A lone backslash that did not start a valid escape.
            return SyntaxKind::Unknown;
        }
        if self.has_unicode_escape() {
            return SyntaxKind::Identifier;
        }
        text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_identifier_parts(&mut self) {
        loop {
            match self.peek_char() {
                Some('\\') => match self.scan_identifier_escape() {
                    Some(ch) => {
                        self.token_flags |= token_flags::UNICODE_ESCAPE;
                        self.token_value.push(ch);
                    }
                    None => break,
                },
                Some(ch) if is_identifier_part(ch) => {
                    self.token_value.push(ch);
                    self.pos += ch.len_utf8();
                }
                _ => break,
            }
        }
    }

    /// `\uXXXX` or `\u{X...}` inside an identifier.
    fn scan_identifier_escape(&mut self) -> Option<char> {
        let start = self.pos;
        if self.byte_at(self.pos + 1) != Some(b'u') {
            self.error(
                diagnostic_codes::INVALID_CHARACTER,
                diagnostic_messages::INVALID_CHARACTER,
                start,
                1,
            );
            self.pos += 1;
            return None;
        }
        self.pos += 2;
        let ch = self.scan_unicode_escape_body();
        if ch.is_none() {
            self.error(
                diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
                diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
                start,
                self.pos - start,
            );
        }
        ch
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        if self.peek_char_at(self.pos + 1).is_some_and(is_identifier_start) {
            self.pos += 1;
            self.token_value.push('#');
            self.scan_identifier_parts();
            return SyntaxKind::PrivateIdentifier;
        }
        self.error(
            diagnostic_codes::INVALID_CHARACTER,
            diagnostic_messages::INVALID_CHARACTER,
            self.pos,
            1,
        );
        self.advance_token(1, SyntaxKind::Unknown)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    fn scan_digits(&mut self, is_valid: fn(u8) -> bool) -> usize {
        let start = self.pos;
        while let Some(b) = self.byte_at(self.pos) {
            if is_valid(b) || (b == b'_' && self.pos > start) {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.pos - start
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let radix_prefix = if self.byte_at(self.pos) == Some(b'0') {
            self.byte_at(self.pos + 1).map(|b| b.to_ascii_lowercase())
        } else {
            None
        };

        match radix_prefix {
            Some(b'x') | Some(b'o') | Some(b'b') => {
                self.pos += 2;
                let valid: fn(u8) -> bool = match radix_prefix {
                    Some(b'x') => is_hex_byte,
                    Some(b'o') => is_octal_byte,
                    _ => is_binary_byte,
                };
                if self.scan_digits(valid) == 0 {
                    self.error(
                        diagnostic_codes::DIGIT_EXPECTED,
                        diagnostic_messages::DIGIT_EXPECTED,
                        self.pos,
                        0,
                    );
                }
            }
            _ => {
                self.scan_digits(|b| b.is_ascii_digit());
                if self.byte_at(self.pos) == Some(b'.') {
                    self.pos += 1;
                    self.scan_digits(|b| b.is_ascii_digit());
                }
                if matches!(self.byte_at(self.pos), Some(b'e') | Some(b'E')) {
                    self.pos += 1;
                    if matches!(self.byte_at(self.pos), Some(b'+') | Some(b'-')) {
                        self.pos += 1;
                    }
                    if self.scan_digits(|b| b.is_ascii_digit()) == 0 {
                        self.error(
                            diagnostic_codes::DIGIT_EXPECTED,
                            diagnostic_messages::DIGIT_EXPECTED,
                            self.pos,
                            0,
                        );
                    }
                }
            }
        }

        let kind = if self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value.push_str(&self.text[start..self.pos]);
        kind
    }

    // =========================================================================
    // Strings and templates
    // =========================================================================

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        loop {
            match self.peek_char() {
                None => {
                    self.report_unterminated_string();
                    break;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    if let Some(cooked) = self.scan_escape_sequence() {
                        self.token_value.push(cooked);
                    }
                }
                Some('\n') | Some('\r') => {
                    self.report_unterminated_string();
                    break;
                }
                Some(c) => {
                    self.token_value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        SyntaxKind::StringLiteral
    }

    fn report_unterminated_string(&mut self) {
        self.token_flags |= token_flags::UNTERMINATED;
        self.error(
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            self.token_start,
            self.pos - self.token_start,
        );
    }

    /// Scan template characters after `` ` `` or `}` up to `${` or the closing backtick.
    fn scan_template(&mut self, started_with_backtick: bool) -> SyntaxKind {
        loop {
            match self.peek_char() {
                None => {
                    self.token_flags |= token_flags::UNTERMINATED;
                    self.error(
                        diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                        diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                        self.token_start,
                        self.pos - self.token_start,
                    );
                    break;
                }
                Some('`') => {
                    self.pos += 1;
                    break;
                }
                Some('$') if self.byte_at(self.pos + 1) == Some(b'{') => {
                    self.pos += 2;
                    return if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                Some('\\') => {
                    if let Some(cooked) = self.scan_escape_sequence() {
                        self.token_value.push(cooked);
                    }
                }
                Some(c) => {
                    self.token_value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        if started_with_backtick {
            SyntaxKind::NoSubstitutionTemplateLiteral
        } else {
            SyntaxKind::TemplateTail
        }
    }

    /// Re-scan the current `}` token as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token = self.scan_template(false);
        self.token
    }

    /// Scan the escape starting at the current backslash; `None` for line continuations.
    fn scan_escape_sequence(&mut self) -> Option<char> {
        let start = self.pos;
        self.pos += 1;
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        match ch {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'b' => Some('\u{0008}'),
            'f' => Some('\u{000c}'),
            'v' => Some('\u{000b}'),
            '0' if !self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) => Some('\0'),
            'x' => {
                let digits = self.text.get(self.pos..self.pos + 2).unwrap_or("");
                if digits.len() == 2 && digits.chars().all(is_hex_digit) {
                    self.pos += 2;
                    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
                } else {
                    self.error(
                        diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
                        diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
                        start,
                        self.pos - start,
                    );
                    None
                }
            }
            'u' => {
                let cooked = self.scan_unicode_escape_body();
                if cooked.is_none() {
                    self.error(
                        diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
                        diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
                        start,
                        self.pos - start,
                    );
                }
                cooked
            }
            '\r' => {
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
                None
            }
            c if is_line_break(c) => None,
            c => Some(c),
        }
    }

    /// Body of a unicode escape after `\u`: `XXXX` or `{X...}`.
    fn scan_unicode_escape_body(&mut self) -> Option<char> {
        if self.byte_at(self.pos) == Some(b'{') {
            let digits_start = self.pos + 1;
            let mut end = digits_start;
            while self.byte_at(end).is_some_and(|b| b.is_ascii_hexdigit()) {
                end += 1;
            }
            if end == digits_start || self.byte_at(end) != Some(b'}') {
                self.pos = end;
                return None;
            }
            let value = u32::from_str_radix(&self.text[digits_start..end], 16).ok();
            self.pos = end + 1;
            return value.and_then(char::from_u32);
        }
        let digits = self.text.get(self.pos..self.pos + 4).unwrap_or("");
        if digits.len() == 4 && digits.chars().all(is_hex_digit) {
            self.pos += 4;
            u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
        } else {
            None
        }
    }

    // =========================================================================
    // Regular expressions
    // =========================================================================

    /// Re-scan the current `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::SlashToken && self.token != SyntaxKind::SlashEqualsToken {
            return self.token;
        }

        let mut p = self.token_start + 1;
        let mut in_class = false;
        let mut in_escape = false;
        loop {
            let Some(ch) = self.peek_char_at(p) else {
                self.report_unterminated_regex(p);
                break;
            };
            if is_line_break(ch) {
                self.report_unterminated_regex(p);
                break;
            }
            p += ch.len_utf8();
            if in_escape {
                in_escape = false;
            } else if ch == '/' && !in_class {
                break;
            } else if ch == '[' {
                in_class = true;
            } else if ch == ']' {
                in_class = false;
            } else if ch == '\\' {
                in_escape = true;
            }
        }

        while let Some(ch) = self.peek_char_at(p) {
            if !is_identifier_part(ch) {
                break;
            }
            p += ch.len_utf8();
        }

        self.pos = p;
        self.token_value.clear();
        self.token_value
            .push_str(&self.text[self.token_start..self.pos]);
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn report_unterminated_regex(&mut self, at: usize) {
        self.token_flags |= token_flags::UNTERMINATED;
        self.error(
            diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            self.token_start,
            at - self.token_start,
        );
    }
}

fn is_hex_byte(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_octal_byte(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}

fn is_binary_byte(b: u8) -> bool {
    b == b'0' || b == b'1'
}
