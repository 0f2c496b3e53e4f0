//! Lexer for Velox using logos with string interning.
//!
//! [`lex`] turns source text into a [`TokenList`] terminated by `Eof`;
//! [`Cursor`] walks that list and is the token source the parser reads.
//! Malformed input never aborts lexing: it becomes an `Error` token plus a
//! [`LexError`] describing what was wrong.

mod cursor;
mod escape;
mod lex_error;
mod raw_token;

#[cfg(test)]
mod tests;

use logos::Logos;
use velox_ir::{Span, StringInterner, Token, TokenKind, TokenList};

pub use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};

use raw_token::RawToken;

/// Output of lexing one source text.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    /// One entry per `Error` token, in source order.
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Maps byte offsets to 1-based line numbers.
///
/// Tokens arrive in source order, so lookups only ever move forward.
struct LineTracker<'src> {
    source: &'src [u8],
    offset: usize,
    line: u32,
}

impl<'src> LineTracker<'src> {
    fn new(source: &'src str) -> Self {
        LineTracker {
            source: source.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> u32 {
        let end = pos.min(self.source.len());
        if end > self.offset {
            let newlines = self.source[self.offset..end]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
            self.offset = end;
        }
        self.line
    }
}

#[inline]
fn to_u32(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX))
}

/// Lex source code into tokens, interning identifiers and strings.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput {
        tokens: TokenList::with_capacity(source.len() / 4 + 1),
        errors: Vec::new(),
    };
    let mut lines = LineTracker::new(source);
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let range = logos.span();
        let line = lines.line_at(range.start);
        let span = Span::new(to_u32(range.start), to_u32(range.end), line);
        let slice = logos.slice();

        let kind = match token_result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => continue,
            Ok(raw) => match convert_token(raw, slice, interner) {
                Ok(kind) => kind,
                Err(kind) => {
                    output.errors.push(LexError::new(kind, span));
                    TokenKind::Error
                }
            },
            Err(()) => {
                output
                    .errors
                    .push(LexError::new(LexErrorKind::classify(slice), span));
                TokenKind::Error
            }
        };
        output.tokens.push(Token::new(kind, span));
    }

    let eof_pos = to_u32(source.len());
    let eof_line = lines.line_at(source.len());
    output
        .tokens
        .push(Token::new(TokenKind::Eof, Span::new(eof_pos, eof_pos, eof_line)));

    output
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(
    raw: RawToken,
    slice: &str,
    interner: &StringInterner,
) -> Result<TokenKind, LexErrorKind> {
    let kind = match raw {
        // Literals
        RawToken::Int(n) | RawToken::HexInt(n) => TokenKind::Int(n),
        RawToken::Real(f) => TokenKind::Real(f.to_bits()),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            let cooked = escape::unescape(content)?;
            TokenKind::String(interner.intern(&cooked))
        }
        RawToken::UnterminatedString => return Err(LexErrorKind::UnterminatedString),
        RawToken::UnterminatedComment => return Err(LexErrorKind::UnterminatedComment),
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        // Keywords
        RawToken::Function => TokenKind::Function,
        RawToken::Class => TokenKind::Class,
        RawToken::Instant => TokenKind::Instant,
        RawToken::New => TokenKind::New,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::For => TokenKind::For,
        RawToken::Loop => TokenKind::Loop,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Return => TokenKind::Return,
        RawToken::Global => TokenKind::Global,
        RawToken::Include => TokenKind::Include,
        RawToken::Var => TokenKind::Var,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Undefined => TokenKind::Undefined,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Pipe => TokenKind::Pipe,

        // Operators
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Bang => TokenKind::Bang,

        // Trivia is dropped before conversion.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Error,
    };
    Ok(kind)
}
