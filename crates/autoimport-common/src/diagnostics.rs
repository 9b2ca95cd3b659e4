use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Numeric codes for front-end diagnostics.
///
/// Codes follow the numbering used by the TypeScript compiler for the same
/// conditions so that messages stay familiar to JavaScript tooling users.
pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const DIGIT_EXPECTED: u32 = 1124;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1125;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const STRING_LITERAL_EXPECTED: u32 = 1141;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const INVALID_DESTRUCTURING_TARGET: u32 = 2364;
    pub const NESTING_TOO_DEEP: u32 = 9001;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const TOKEN_EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const DIGIT_EXPECTED: &str = "Digit expected.";
    pub const HEXADECIMAL_DIGIT_EXPECTED: &str = "Hexadecimal digit expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const STRING_LITERAL_EXPECTED: &str = "String literal expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const INVALID_DESTRUCTURING_TARGET: &str =
        "The left-hand side of an assignment expression must be a variable or a property access.";
    pub const NESTING_TOO_DEEP: &str = "Expression nesting is too deep to parse.";
}

use self::diagnostic_codes as codes;
use self::diagnostic_messages as messages;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    error(codes::UNTERMINATED_STRING_LITERAL, messages::UNTERMINATED_STRING_LITERAL),
    error(codes::IDENTIFIER_EXPECTED, messages::IDENTIFIER_EXPECTED),
    error(codes::TOKEN_EXPECTED, messages::TOKEN_EXPECTED),
    error(codes::ASTERISK_SLASH_EXPECTED, messages::ASTERISK_SLASH_EXPECTED),
    error(codes::DIGIT_EXPECTED, messages::DIGIT_EXPECTED),
    error(codes::HEXADECIMAL_DIGIT_EXPECTED, messages::HEXADECIMAL_DIGIT_EXPECTED),
    error(codes::INVALID_CHARACTER, messages::INVALID_CHARACTER),
    error(
        codes::DECLARATION_OR_STATEMENT_EXPECTED,
        messages::DECLARATION_OR_STATEMENT_EXPECTED,
    ),
    error(codes::EXPRESSION_EXPECTED, messages::EXPRESSION_EXPECTED),
    error(codes::STRING_LITERAL_EXPECTED, messages::STRING_LITERAL_EXPECTED),
    error(codes::UNTERMINATED_TEMPLATE_LITERAL, messages::UNTERMINATED_TEMPLATE_LITERAL),
    error(
        codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
        messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
    ),
    error(codes::INVALID_DESTRUCTURING_TARGET, messages::INVALID_DESTRUCTURING_TARGET),
    error(codes::NESTING_TOO_DEEP, messages::NESTING_TOO_DEEP),
];

const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        category: DiagnosticCategory::Error,
        message,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    pub fn warning(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            ..Self::error(file, start, length, message, code)
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_substitutes_positional_args() {
        let text = format_message(messages::TOKEN_EXPECTED, &[")"]);
        assert_eq!(text, "')' expected.");
    }

    #[test]
    fn test_message_template_lookup() {
        assert_eq!(
            get_message_template(codes::EXPRESSION_EXPECTED),
            Some("Expression expected.")
        );
        assert_eq!(get_message_template(42), None);
    }
}
