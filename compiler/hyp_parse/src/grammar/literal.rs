//! Literal conversion.

use std::borrow::Cow;

/// Strip the quotes from a string lexeme and process escapes.
///
/// `\n \t \r \0` are control characters; any other escaped character stands
/// for itself, which covers `\\`, `\"` and `\'`.
pub(crate) fn unescape_string(lexeme: &str) -> Cow<'_, str> {
    let body = lexeme.get(1..lexeme.len().saturating_sub(1)).unwrap_or("");
    if !body.contains('\\') {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Cow::Owned(out)
}

/// Convert a number lexeme. The lexer only produces decimal forms that
/// `f64::from_str` accepts, so failure means a malformed token.
pub(crate) fn parse_number(lexeme: &str) -> Option<f64> {
    lexeme.parse().ok()
}
