//! Parse error type.

use std::fmt;

use velox_diagnostic::{Diagnostic, ErrorCode};
use velox_ir::{Span, TokenKind};
use velox_lexer::LexError;

/// Parse error with error code for rich diagnostics.
///
/// Parsing stops at the first error; no partial program is produced.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// What was being parsed, e.g. "while parsing a class body".
    pub context: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// 1-based source line of the offending token.
    pub fn line(&self) -> u32 {
        self.span.line
    }

    #[cold]
    pub fn unexpected_token(span: Span, expected: &str, found: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found `{}`", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn expected_expression(span: Span, found: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found `{}`", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn unclosed_delimiter(span: Span, close: TokenKind, found: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!(
                "missing `{}`, found `{}`",
                close.display_name(),
                found.display_name()
            ),
            span,
        )
    }

    #[cold]
    pub fn expected_identifier(span: Span, found: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found `{}`", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn lvalue_required(span: Span) -> Self {
        ParseError::new(ErrorCode::E1005, "lvalue required", span)
    }

    #[cold]
    pub fn ambiguous_function_name(span: Span, name: &str) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("ambiguous function name `{name}`"),
            span,
        )
    }

    #[cold]
    pub fn duplicate_parameter(span: Span, name: &str) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!("duplicate parameter `{name}`"),
            span,
        )
    }

    #[cold]
    pub fn outside_loop(span: Span, keyword: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1008,
            format!("`{}` outside of a loop", keyword.display_name()),
            span,
        )
    }

    #[cold]
    pub fn include_failed(span: Span, path: &str, reason: impl fmt::Display) -> Self {
        ParseError::new(
            ErrorCode::E1009,
            format!("cannot include \"{path}\": {reason}"),
            span,
        )
    }

    #[cold]
    pub fn recursive_include(span: Span, path: &str) -> Self {
        ParseError::new(
            ErrorCode::E1010,
            format!("recursive include of \"{path}\""),
            span,
        )
    }

    #[cold]
    pub fn invalid_class_member(span: Span, found: TokenKind) -> Self {
        ParseError::new(
            ErrorCode::E1011,
            format!(
                "class bodies may only contain functions, found `{}`",
                found.display_name()
            ),
            span,
        )
    }

    #[cold]
    pub fn invalid_token(span: Span) -> Self {
        ParseError::new(ErrorCode::E0002, "invalid token", span)
    }

    #[cold]
    pub fn from_lex_error(error: &LexError) -> Self {
        ParseError::new(error.kind.code(), error.kind.to_string(), error.span)
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.span.line, self.message)
    }
}

impl std::error::Error for ParseError {}
