//! Character classification utilities.

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{feff}';
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200c}';
pub const ZERO_WIDTH_JOINER: char = '\u{200d}';

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whitespace other than line terminators.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\u{000b}' | '\u{000c}' | '\u{00a0}' | BYTE_ORDER_MARK => true,
        c if c.is_ascii() => false,
        c => c.is_whitespace() && !is_line_break(c),
    }
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    match ch {
        'a'..='z' | 'A'..='Z' | '$' | '_' => true,
        c if c.is_ascii() => false,
        c => c.is_alphabetic(),
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    match ch {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '$' | '_' => true,
        ZERO_WIDTH_NON_JOINER | ZERO_WIDTH_JOINER => true,
        c if c.is_ascii() => false,
        c => c.is_alphanumeric(),
    }
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}
