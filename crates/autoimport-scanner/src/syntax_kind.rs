//! Token kinds produced by the scanner.
//!
//! Node kinds that have no token counterpart live in the parser's
//! `syntax_kind_ext` module and start after `SyntaxKind::LastToken`.

use serde::Serialize;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords
    AsKeyword,
    AssertKeyword,
    AsyncKeyword,
    AwaitKeyword,
    FromKeyword,
    GetKeyword,
    LetKeyword,
    OfKeyword,
    SetKeyword,
    StaticKeyword,
    YieldKeyword,

    LastToken,
}

impl SyntaxKind {
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AsKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;

    /// Convert a raw `u16` node kind back into a token kind.
    pub fn try_from_u16(value: u16) -> Option<SyntaxKind> {
        if value < SyntaxKind::LastToken as u16 {
            // Discriminants are contiguous from 0, so ALL_TOKENS is indexed by them.
            ALL_TOKENS.get(value as usize).copied()
        } else {
            None
        }
    }
}

/// Keyword table. Order does not matter; lookups are linear over a short list.
const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("assert", SyntaxKind::AssertKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("of", SyntaxKind::OfKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("yield", SyntaxKind::YieldKeyword),
];

const PUNCTUATION: &[(SyntaxKind, &str)] = &[
    (SyntaxKind::OpenBraceToken, "{"),
    (SyntaxKind::CloseBraceToken, "}"),
    (SyntaxKind::OpenParenToken, "("),
    (SyntaxKind::CloseParenToken, ")"),
    (SyntaxKind::OpenBracketToken, "["),
    (SyntaxKind::CloseBracketToken, "]"),
    (SyntaxKind::DotToken, "."),
    (SyntaxKind::DotDotDotToken, "..."),
    (SyntaxKind::SemicolonToken, ";"),
    (SyntaxKind::CommaToken, ","),
    (SyntaxKind::QuestionDotToken, "?."),
    (SyntaxKind::LessThanToken, "<"),
    (SyntaxKind::GreaterThanToken, ">"),
    (SyntaxKind::LessThanEqualsToken, "<="),
    (SyntaxKind::GreaterThanEqualsToken, ">="),
    (SyntaxKind::EqualsEqualsToken, "=="),
    (SyntaxKind::ExclamationEqualsToken, "!="),
    (SyntaxKind::EqualsEqualsEqualsToken, "==="),
    (SyntaxKind::ExclamationEqualsEqualsToken, "!=="),
    (SyntaxKind::EqualsGreaterThanToken, "=>"),
    (SyntaxKind::PlusToken, "+"),
    (SyntaxKind::MinusToken, "-"),
    (SyntaxKind::AsteriskToken, "*"),
    (SyntaxKind::AsteriskAsteriskToken, "**"),
    (SyntaxKind::SlashToken, "/"),
    (SyntaxKind::PercentToken, "%"),
    (SyntaxKind::PlusPlusToken, "++"),
    (SyntaxKind::MinusMinusToken, "--"),
    (SyntaxKind::LessThanLessThanToken, "<<"),
    (SyntaxKind::GreaterThanGreaterThanToken, ">>"),
    (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, ">>>"),
    (SyntaxKind::AmpersandToken, "&"),
    (SyntaxKind::BarToken, "|"),
    (SyntaxKind::CaretToken, "^"),
    (SyntaxKind::ExclamationToken, "!"),
    (SyntaxKind::TildeToken, "~"),
    (SyntaxKind::AmpersandAmpersandToken, "&&"),
    (SyntaxKind::BarBarToken, "||"),
    (SyntaxKind::QuestionToken, "?"),
    (SyntaxKind::ColonToken, ":"),
    (SyntaxKind::AtToken, "@"),
    (SyntaxKind::QuestionQuestionToken, "??"),
    (SyntaxKind::EqualsToken, "="),
    (SyntaxKind::PlusEqualsToken, "+="),
    (SyntaxKind::MinusEqualsToken, "-="),
    (SyntaxKind::AsteriskEqualsToken, "*="),
    (SyntaxKind::AsteriskAsteriskEqualsToken, "**="),
    (SyntaxKind::SlashEqualsToken, "/="),
    (SyntaxKind::PercentEqualsToken, "%="),
    (SyntaxKind::LessThanLessThanEqualsToken, "<<="),
    (SyntaxKind::GreaterThanGreaterThanEqualsToken, ">>="),
    (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, ">>>="),
    (SyntaxKind::AmpersandEqualsToken, "&="),
    (SyntaxKind::BarEqualsToken, "|="),
    (SyntaxKind::CaretEqualsToken, "^="),
    (SyntaxKind::BarBarEqualsToken, "||="),
    (SyntaxKind::AmpersandAmpersandEqualsToken, "&&="),
    (SyntaxKind::QuestionQuestionEqualsToken, "??="),
];

/// Every token kind, indexed by discriminant.
static ALL_TOKENS: &[SyntaxKind] = &[
    SyntaxKind::Unknown,
    SyntaxKind::EndOfFileToken,
    SyntaxKind::NumericLiteral,
    SyntaxKind::BigIntLiteral,
    SyntaxKind::StringLiteral,
    SyntaxKind::RegularExpressionLiteral,
    SyntaxKind::NoSubstitutionTemplateLiteral,
    SyntaxKind::TemplateHead,
    SyntaxKind::TemplateMiddle,
    SyntaxKind::TemplateTail,
    SyntaxKind::OpenBraceToken,
    SyntaxKind::CloseBraceToken,
    SyntaxKind::OpenParenToken,
    SyntaxKind::CloseParenToken,
    SyntaxKind::OpenBracketToken,
    SyntaxKind::CloseBracketToken,
    SyntaxKind::DotToken,
    SyntaxKind::DotDotDotToken,
    SyntaxKind::SemicolonToken,
    SyntaxKind::CommaToken,
    SyntaxKind::QuestionDotToken,
    SyntaxKind::LessThanToken,
    SyntaxKind::GreaterThanToken,
    SyntaxKind::LessThanEqualsToken,
    SyntaxKind::GreaterThanEqualsToken,
    SyntaxKind::EqualsEqualsToken,
    SyntaxKind::ExclamationEqualsToken,
    SyntaxKind::EqualsEqualsEqualsToken,
    SyntaxKind::ExclamationEqualsEqualsToken,
    SyntaxKind::EqualsGreaterThanToken,
    SyntaxKind::PlusToken,
    SyntaxKind::MinusToken,
    SyntaxKind::AsteriskToken,
    SyntaxKind::AsteriskAsteriskToken,
    SyntaxKind::SlashToken,
    SyntaxKind::PercentToken,
    SyntaxKind::PlusPlusToken,
    SyntaxKind::MinusMinusToken,
    SyntaxKind::LessThanLessThanToken,
    SyntaxKind::GreaterThanGreaterThanToken,
    SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
    SyntaxKind::AmpersandToken,
    SyntaxKind::BarToken,
    SyntaxKind::CaretToken,
    SyntaxKind::ExclamationToken,
    SyntaxKind::TildeToken,
    SyntaxKind::AmpersandAmpersandToken,
    SyntaxKind::BarBarToken,
    SyntaxKind::QuestionToken,
    SyntaxKind::ColonToken,
    SyntaxKind::AtToken,
    SyntaxKind::QuestionQuestionToken,
    SyntaxKind::EqualsToken,
    SyntaxKind::PlusEqualsToken,
    SyntaxKind::MinusEqualsToken,
    SyntaxKind::AsteriskEqualsToken,
    SyntaxKind::AsteriskAsteriskEqualsToken,
    SyntaxKind::SlashEqualsToken,
    SyntaxKind::PercentEqualsToken,
    SyntaxKind::LessThanLessThanEqualsToken,
    SyntaxKind::GreaterThanGreaterThanEqualsToken,
    SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
    SyntaxKind::AmpersandEqualsToken,
    SyntaxKind::BarEqualsToken,
    SyntaxKind::CaretEqualsToken,
    SyntaxKind::BarBarEqualsToken,
    SyntaxKind::AmpersandAmpersandEqualsToken,
    SyntaxKind::QuestionQuestionEqualsToken,
    SyntaxKind::Identifier,
    SyntaxKind::PrivateIdentifier,
    SyntaxKind::BreakKeyword,
    SyntaxKind::CaseKeyword,
    SyntaxKind::CatchKeyword,
    SyntaxKind::ClassKeyword,
    SyntaxKind::ConstKeyword,
    SyntaxKind::ContinueKeyword,
    SyntaxKind::DebuggerKeyword,
    SyntaxKind::DefaultKeyword,
    SyntaxKind::DeleteKeyword,
    SyntaxKind::DoKeyword,
    SyntaxKind::ElseKeyword,
    SyntaxKind::EnumKeyword,
    SyntaxKind::ExportKeyword,
    SyntaxKind::ExtendsKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::FinallyKeyword,
    SyntaxKind::ForKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::IfKeyword,
    SyntaxKind::ImportKeyword,
    SyntaxKind::InKeyword,
    SyntaxKind::InstanceOfKeyword,
    SyntaxKind::NewKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::SuperKeyword,
    SyntaxKind::SwitchKeyword,
    SyntaxKind::ThisKeyword,
    SyntaxKind::ThrowKeyword,
    SyntaxKind::TrueKeyword,
    SyntaxKind::TryKeyword,
    SyntaxKind::TypeOfKeyword,
    SyntaxKind::VarKeyword,
    SyntaxKind::VoidKeyword,
    SyntaxKind::WhileKeyword,
    SyntaxKind::WithKeyword,
    SyntaxKind::AsKeyword,
    SyntaxKind::AssertKeyword,
    SyntaxKind::AsyncKeyword,
    SyntaxKind::AwaitKeyword,
    SyntaxKind::FromKeyword,
    SyntaxKind::GetKeyword,
    SyntaxKind::LetKeyword,
    SyntaxKind::OfKeyword,
    SyntaxKind::SetKeyword,
    SyntaxKind::StaticKeyword,
    SyntaxKind::YieldKeyword,
];

/// Look up the keyword kind for an identifier's text.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    // All keywords are lowercase ASCII between 2 and 10 bytes long.
    if text.len() < 2 || text.len() > 10 || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == text)
        .map(|&(_, kind)| kind)
}

/// Source text of a fixed-text token (punctuation or keyword).
pub fn token_to_text(kind: SyntaxKind) -> Option<&'static str> {
    if let Some(&(_, text)) = PUNCTUATION.iter().find(|(k, _)| *k == kind) {
        return Some(text);
    }
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|&(text, _)| text)
}

pub fn is_reserved_word(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_RESERVED_WORD && kind <= SyntaxKind::LAST_RESERVED_WORD
}

pub fn is_contextual_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_CONTEXTUAL_KEYWORD && kind <= SyntaxKind::LAST_CONTEXTUAL_KEYWORD
}

pub fn is_keyword(kind: SyntaxKind) -> bool {
    is_reserved_word(kind) || is_contextual_keyword(kind)
}

/// Identifiers and every keyword; used where any name is allowed (property names).
pub fn is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || is_keyword(kind)
}

pub fn is_assignment_operator(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_ASSIGNMENT && kind <= SyntaxKind::LAST_ASSIGNMENT
}
