//! Run-time errors.
//!
//! Every failure raised while executing a script is an [`EvalError`]:
//! a structured [`EvalErrorKind`] for programmatic matching, a
//! human-readable message, and the source span of the statement or
//! expression being evaluated. Operator and coercion errors are created
//! without a span and picked up by the nearest enclosing node with
//! [`EvalError::at`].
//!
//! Factory functions are `#[cold]` to keep them off the hot path.

use std::fmt;

use velox_diagnostic::{Diagnostic, ErrorCode};
use velox_ir::Span;

use crate::value::ValueKind;

/// Result of evaluating anything that can fail at run time.
pub type EvalResult<T = crate::Item> = Result<T, EvalError>;

/// Structured run-time error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UnknownIdentifier {
        name: String,
    },
    UnknownField {
        field: String,
        kind: ValueKind,
    },
    /// Operator applied to a kind (or kind pair) with no defined behavior.
    UnsupportedOperation {
        op: &'static str,
        left: ValueKind,
        right: Option<ValueKind>,
    },
    TooManyParameters {
        function: String,
        expected: usize,
        got: usize,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    DivisionByZero {
        op: &'static str,
    },
    NotCallable {
        kind: ValueKind,
    },
    UnknownClass {
        name: String,
    },
    IntegerOverflow {
        op: &'static str,
    },
    RecursionLimit {
        limit: usize,
    },
    InvalidConversion {
        from: ValueKind,
        to: &'static str,
    },
    ReadOnlyMember {
        field: String,
        kind: ValueKind,
    },
    ThisOutsideMethod,
    /// Realization (`Name { ... }`) of something that is not an object.
    NotAnObject {
        name: String,
        kind: ValueKind,
    },
    /// Failure reported by a host-provided native function.
    Native {
        message: String,
    },
}

impl EvalErrorKind {
    /// Diagnostic code for this error category.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownIdentifier { .. } => ErrorCode::E2001,
            Self::UnknownField { .. } => ErrorCode::E2002,
            Self::UnsupportedOperation { .. } => ErrorCode::E2003,
            Self::TooManyParameters { .. } => ErrorCode::E2004,
            Self::IndexOutOfBounds { .. } => ErrorCode::E2005,
            Self::DivisionByZero { .. } => ErrorCode::E2006,
            Self::NotCallable { .. } => ErrorCode::E2007,
            Self::UnknownClass { .. } => ErrorCode::E2008,
            Self::IntegerOverflow { .. } => ErrorCode::E2009,
            Self::RecursionLimit { .. } => ErrorCode::E2010,
            Self::InvalidConversion { .. } => ErrorCode::E2011,
            Self::ReadOnlyMember { .. } => ErrorCode::E2012,
            Self::ThisOutsideMethod => ErrorCode::E2013,
            Self::NotAnObject { .. } => ErrorCode::E2014,
            Self::Native { .. } => ErrorCode::E2015,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentifier { name } => write!(f, "unknown identifier `{name}`"),
            Self::UnknownField { field, kind } => {
                write!(f, "unknown field `{field}` on {kind}")
            }
            Self::UnsupportedOperation {
                op,
                left,
                right: Some(right),
            } => write!(
                f,
                "unsupported operation between types {left} and {right} (`{op}`)"
            ),
            Self::UnsupportedOperation {
                op,
                left,
                right: None,
            } => write!(f, "unsupported operation `{op}` on type {left}"),
            Self::TooManyParameters {
                function,
                expected,
                got,
            } => write!(
                f,
                "function call with too many parameters: `{function}` takes {expected}, got {got}"
            ),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            Self::DivisionByZero { op } => write!(f, "division by zero (`{op}`)"),
            Self::NotCallable { kind } => write!(f, "value of type {kind} is not callable"),
            Self::UnknownClass { name } => write!(f, "unknown class `{name}`"),
            Self::IntegerOverflow { op } => write!(f, "integer overflow in `{op}`"),
            Self::RecursionLimit { limit } => {
                write!(f, "maximum recursion depth exceeded ({limit} calls)")
            }
            Self::InvalidConversion { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
            Self::ReadOnlyMember { field, kind } => {
                write!(f, "member `{field}` of {kind} is read-only")
            }
            Self::ThisOutsideMethod => {
                write!(f, "`this` used outside of a method or realization")
            }
            Self::NotAnObject { name, kind } => {
                write!(f, "cannot realize `{name}`: it holds {kind}, not an object")
            }
            Self::Native { message } => f.write_str(message),
        }
    }
}

/// Run-time error with optional source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    pub span: Option<Span>,
    /// Extra context, e.g. the call chain a native error surfaced through.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error whose message is the kind's display text.
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            message: kind.to_string(),
            kind,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Error raised by a native function.
    #[cold]
    pub fn native(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Native {
            message: message.into(),
        })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// 1-based source line, when known.
    pub fn line(&self) -> Option<u32> {
        self.span.map(|span| span.line)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code()).with_message(&self.message);
        if let Some(span) = self.span {
            diagnostic = diagnostic.with_label(span, "raised here");
        }
        for note in &self.notes {
            diagnostic = diagnostic.with_note(note);
        }
        diagnostic
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line() {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Factories

#[cold]
pub fn unknown_identifier(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownIdentifier {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_field(field: &str, kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownField {
        field: field.to_string(),
        kind,
    })
}

#[cold]
pub fn unsupported_binary(op: &'static str, left: ValueKind, right: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op,
        left,
        right: Some(right),
    })
}

#[cold]
pub fn unsupported_unary(op: &'static str, operand: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op,
        left: operand,
        right: None,
    })
}

#[cold]
pub fn too_many_parameters(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyParameters {
        function: function.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn division_by_zero(op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero { op })
}

#[cold]
pub fn not_callable(kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { kind })
}

#[cold]
pub fn unknown_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownClass {
        name: name.to_string(),
    })
}

#[cold]
pub fn integer_overflow(op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { op })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn invalid_conversion(from: ValueKind, to: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion { from, to })
}

#[cold]
pub fn read_only_member(field: &str, kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyMember {
        field: field.to_string(),
        kind,
    })
}

#[cold]
pub fn this_outside_method() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ThisOutsideMethod)
}

#[cold]
pub fn not_an_object(name: &str, kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnObject {
        name: name.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn message_comes_from_kind() {
        let err = unsupported_binary("*", ValueKind::String, ValueKind::Color);
        assert_eq!(
            err.message,
            "unsupported operation between types string and color (`*`)"
        );
        assert_eq!(err.code(), ErrorCode::E2003);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn display_includes_line() {
        let err = division_by_zero("/").with_span(Span::new(10, 15, 4));
        assert_eq!(err.to_string(), "line 4: division by zero (`/`)");
    }

    #[test]
    fn at_keeps_inner_span() {
        let inner = Span::new(20, 21, 7);
        let outer = Span::new(0, 30, 6);
        let err = unknown_identifier("x").with_span(inner).at(outer);
        assert_eq!(err.span, Some(inner));

        let err = unknown_identifier("x").at(outer);
        assert_eq!(err.span, Some(outer));
    }

    #[test]
    fn diagnostic_carries_code_and_label() {
        let err = too_many_parameters("f", 1, 3)
            .with_span(Span::new(0, 4, 2))
            .with_note("called from `g`");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2004);
        assert_eq!(diag.line(), Some(2));
        assert_eq!(diag.notes, vec!["called from `g`".to_string()]);
        assert!(diag
            .message
            .starts_with("function call with too many parameters"));
    }

    #[test]
    fn unary_message() {
        let err = unsupported_unary("-", ValueKind::Boolean);
        assert_eq!(err.message, "unsupported operation `-` on type boolean");
    }
}
