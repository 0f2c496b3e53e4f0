use std::fmt;

use velox_diagnostic::{Diagnostic, ErrorCode};
use velox_ir::Span;

/// A lexer error recorded next to the `Error` token it produced.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// What kind of lexer error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    UnterminatedString,
    /// `/*` without a matching `*/`.
    UnterminatedComment,
    /// Unknown escape in a string literal (e.g., `\q`).
    InvalidEscape { escape_char: char },
    /// Integer literal does not fit in 64 bits.
    IntOverflow,
    /// Character that starts no token.
    InvalidCharacter { found: char },
}

impl LexErrorKind {
    /// Classify a slice logos rejected outright.
    pub(crate) fn classify(slice: &str) -> Self {
        match slice.chars().next() {
            Some(c) if c.is_ascii_digit() => LexErrorKind::IntOverflow,
            Some(found) => LexErrorKind::InvalidCharacter { found },
            None => LexErrorKind::InvalidCharacter { found: '\0' },
        }
    }

    pub fn code(self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedComment => {
                ErrorCode::E0001
            }
            LexErrorKind::InvalidCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::IntOverflow => ErrorCode::E0003,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0004,
        }
    }
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.kind.code())
            .with_message(self.to_string())
            .with_label(self.span, "while reading this token")
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorKind::InvalidEscape { escape_char } => {
                write!(f, "invalid escape sequence `\\{escape_char}`")
            }
            LexErrorKind::IntOverflow => write!(f, "integer literal is too large"),
            LexErrorKind::InvalidCharacter { found } => {
                write!(f, "invalid character `{}`", found.escape_default())
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.span.line, self.kind)
    }
}

impl std::error::Error for LexError {}
