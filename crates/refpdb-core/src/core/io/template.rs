//! Escaping for TypeScript template literals.
//!
//! Reference texts are embedded verbatim between backticks. Only the sequences that would
//! end the literal or change its value are escaped: a backslash, a backtick, the `${`
//! interpolation opener and carriage returns. A raw CR in a template literal evaluates
//! to LF, so `\r\n` line endings only survive as the `\r` escape.

use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template literal is not terminated")]
    Unterminated,
    #[error("Unsupported escape sequence '\\{0}' in template literal")]
    UnsupportedEscape(char),
    #[error("Template literal contains an interpolation, which is not supported")]
    Interpolation,
}

pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '`', '\r']) && !text.contains("${") {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '\r' => escaped.push_str("\\r"),
            '$' if chars.peek() == Some(&'{') => escaped.push_str("\\$"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Reads a literal body from `input`, which must start right after the opening backtick.
///
/// Returns the unescaped body and the number of bytes consumed, including the closing backtick.
/// Raw line endings are normalized the way a template literal evaluates them: `\r\n` and a
/// lone `\r` both become `\n`.
pub fn read_literal(input: &str) -> Result<(String, usize), TemplateError> {
    let mut body = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '`' => return Ok((body, offset + 1)),
            '\\' => match chars.next() {
                Some((_, escaped @ ('\\' | '`' | '$'))) => body.push(escaped),
                Some((_, 'r')) => body.push('\r'),
                Some((_, other)) => return Err(TemplateError::UnsupportedEscape(other)),
                None => return Err(TemplateError::Unterminated),
            },
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                return Err(TemplateError::Interpolation);
            }
            '\r' => {
                chars.next_if(|&(_, next)| next == '\n');
                body.push('\n');
            }
            _ => body.push(c),
        }
    }

    Err(TemplateError::Unterminated)
}
