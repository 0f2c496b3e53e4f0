//! Token cursor: the concrete token source handed to the parser.

use velox_ir::{Span, Token, TokenKind, TokenList, TokenSource};

/// Cursor over a lexed [`TokenList`].
///
/// Invariant: the list ends with `Eof` and the position never moves past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn token_at(&self, pos: usize) -> Option<&'a Token> {
        self.tokens.get(pos)
    }

    #[inline]
    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }
}

impl TokenSource for Cursor<'_> {
    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.token_at(self.pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    fn advance(&mut self) -> TokenKind {
        if self.pos < self.last_index() {
            self.pos += 1;
        }
        self.current_kind()
    }

    #[inline]
    fn span(&self) -> Span {
        self.token_at(self.pos).map_or(Span::DUMMY, |t| t.span)
    }

    fn is_block_start_following(&self) -> bool {
        self.token_at(self.pos + 1)
            .is_some_and(|t| t.kind == TokenKind::LBrace)
    }
}
