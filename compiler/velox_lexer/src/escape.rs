//! Escape processing for string literals.
//!
//! Valid escapes: `\"` `\\` `\n` `\t` `\r` `\0`.

use std::borrow::Cow;

use crate::LexErrorKind;

/// Unescape a string literal's content (between the `"`s).
///
/// Borrows the slice unchanged when it holds no backslash.
pub(crate) fn unescape(content: &str) -> Result<Cow<'_, str>, LexErrorKind> {
    if !content.contains('\\') {
        return Ok(Cow::Borrowed(content));
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let cooked = match chars.next() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some(escape_char) => return Err(LexErrorKind::InvalidEscape { escape_char }),
            // The literal regex never ends content on a lone backslash.
            None => return Err(LexErrorKind::InvalidEscape { escape_char: '\\' }),
        };
        result.push(cooked);
    }
    Ok(Cow::Owned(result))
}
