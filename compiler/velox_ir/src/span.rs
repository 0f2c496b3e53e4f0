//! Source location spans.

use std::fmt;

/// Source location span.
///
/// Byte offsets locate the text; `line` is the 1-based line of `start`,
/// which is what every user-facing error reports.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
}

impl Span {
    /// Dummy span for generated code.
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32, line: u32) -> Self {
        Span { start, end, line }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Merge two spans to create one covering both.
    ///
    /// The merged span keeps the line of whichever span starts first.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        let line = if other.start < self.start {
            other.line
        } else {
            self.line
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}", self.start, self.end, self.line)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_earliest_line() {
        let a = Span::new(10, 12, 2);
        let b = Span::new(3, 5, 1);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(3, 12, 1));
        assert_eq!(b.merge(a), Span::new(3, 12, 1));
    }

    #[test]
    fn display_reports_line() {
        assert_eq!(Span::new(0, 1, 7).to_string(), "line 7");
    }
}
