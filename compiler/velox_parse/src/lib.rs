//! Recursive descent parser for Velox.
//!
//! Reads any [`TokenSource`] with one token of lookahead and produces an
//! immutable [`Program`]: a flat AST in a [`SharedArena`] plus the root
//! statement sequence. Parsing aborts at the first error.

mod error;
mod grammar;

#[cfg(test)]
mod tests;

use std::io;

use velox_ir::{
    Expr, ExprArena, ExprId, Name, SharedArena, SharedInterner, Span, Stmt, StmtId,
    StmtKind, StringInterner, TokenKind, TokenSource,
};

pub use error::ParseError;

/// Host hook that resolves `include "path";` to source text.
pub trait SourceLoader {
    fn load(&self, path: &str) -> io::Result<String>;
}

/// A parsed script, ready to run against any number of contexts.
#[derive(Clone, Debug)]
pub struct Program {
    pub arena: SharedArena,
    /// Root `Sequence` statement.
    pub root: StmtId,
    pub interner: SharedInterner,
}

impl Program {
    /// Top-level statements in source order.
    pub fn statements(&self) -> &[StmtId] {
        match self.arena.get_stmt(self.root).kind {
            StmtKind::Sequence(range) => self.arena.get_stmt_list(range),
            _ => &[],
        }
    }
}

/// Parse a token stream into a program.
///
/// `include` is rejected when no `loader` is given.
pub fn parse<T: TokenSource>(
    tokens: T,
    interner: &SharedInterner,
    loader: Option<&dyn SourceLoader>,
) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens, interner, loader, ExprArena::new());
    let root = parser.parse_program()?;
    Ok(Program {
        arena: SharedArena::new(parser.arena),
        root,
        interner: interner.clone(),
    })
}

/// Lex and parse source text. Lexer errors are reported as parse errors.
pub fn parse_source(
    source: &str,
    interner: &SharedInterner,
    loader: Option<&dyn SourceLoader>,
) -> Result<Program, ParseError> {
    let lexed = velox_lexer::lex(source, interner);
    if let Some(error) = lexed.errors.first() {
        return Err(ParseError::from_lex_error(error));
    }
    parse(velox_lexer::Cursor::new(&lexed.tokens), interner, loader)
}

/// Parser state.
pub struct Parser<'a, T: TokenSource> {
    tokens: T,
    arena: ExprArena,
    interner: &'a StringInterner,
    loader: Option<&'a dyn SourceLoader>,
    /// Paths currently being included, outermost first.
    include_stack: Vec<Name>,
    /// Number of loops enclosing the current statement within one function.
    loop_depth: u32,
    prev_span: Span,
}

impl<'a, T: TokenSource> Parser<'a, T> {
    fn new(
        tokens: T,
        interner: &'a StringInterner,
        loader: Option<&'a dyn SourceLoader>,
        arena: ExprArena,
    ) -> Self {
        Parser {
            tokens,
            arena,
            interner,
            loader,
            include_stack: Vec::new(),
            loop_depth: 0,
            prev_span: Span::DUMMY,
        }
    }

    // Token navigation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.tokens.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.tokens.span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.prev_span
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn advance(&mut self) -> TokenKind {
        self.prev_span = self.current_span();
        self.tokens.advance()
    }

    /// Consume `kind` if it is the current token.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_expected(&format!("`{}`", kind.display_name())))
        }
    }

    /// Expect a closing delimiter (reported as a missing delimiter).
    fn expect_closing(&mut self, close: TokenKind) -> Result<Span, ParseError> {
        if self.check(close) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.lexical_or(|kind, span| ParseError::unclosed_delimiter(span, close, kind)))
        }
    }

    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name)
        } else {
            Err(self.lexical_or(|kind, span| ParseError::expected_identifier(span, kind)))
        }
    }

    #[cold]
    fn error_expected(&self, expected: &str) -> ParseError {
        self.lexical_or(|kind, span| ParseError::unexpected_token(span, expected, kind))
    }

    /// An `Error` token always reports as an invalid token, whatever was expected.
    #[cold]
    fn lexical_or(&self, make: impl FnOnce(TokenKind, Span) -> ParseError) -> ParseError {
        let kind = self.current_kind();
        let span = self.current_span();
        if kind == TokenKind::Error {
            ParseError::invalid_token(span)
        } else {
            make(kind, span)
        }
    }

    #[inline]
    fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // Node allocation

    fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc_expr(expr)
    }

    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }
}
