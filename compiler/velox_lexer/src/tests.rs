use pretty_assertions::assert_eq;
use velox_ir::{StringInterner, TokenKind, TokenSource};

use crate::{lex, Cursor, LexErrorKind};

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn statement_tokens() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    assert_eq!(
        kinds("x += 2 * 0x10;", &interner),
        vec![
            TokenKind::Ident(x),
            TokenKind::PlusEq,
            TokenKind::Int(2),
            TokenKind::Star,
            TokenKind::Int(16),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_are_not_identifiers() {
    let interner = StringInterner::new();
    let toks = kinds("instant undefined this thisIsName", &interner);
    assert_eq!(toks[0], TokenKind::Instant);
    assert_eq!(toks[1], TokenKind::Undefined);
    assert_eq!(toks[2], TokenKind::This);
    assert_eq!(toks[3], TokenKind::Ident(interner.intern("thisIsName")));
}

#[test]
fn compound_operators_prefer_longest_match() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("++ -- <= >= == != && || %= !", &interner),
        vec![
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::PercentEq,
            TokenKind::Bang,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn reals_and_member_access() {
    let interner = StringInterner::new();
    let toks = kinds("1.5 v.x", &interner);
    assert_eq!(toks[0], TokenKind::Real(1.5f64.to_bits()));
    assert_eq!(toks[2], TokenKind::Dot);
}

#[test]
fn strings_are_unescaped_and_interned() {
    let interner = StringInterner::new();
    let toks = kinds(r#""a\tb\"c""#, &interner);
    assert_eq!(toks[0], TokenKind::String(interner.intern("a\tb\"c")));
}

#[test]
fn comments_are_skipped_and_lines_tracked() {
    let interner = StringInterner::new();
    let out = lex("a; // one\n/* two\nthree */ b;\n\nc", &interner);
    let lines: Vec<u32> = out.tokens.iter().map(|t| t.span.line).collect();
    // a ; b ; c Eof
    assert_eq!(lines, vec![1, 1, 3, 3, 5, 5]);
    assert!(!out.has_errors());
}

#[test]
fn bad_input_becomes_error_tokens() {
    let interner = StringInterner::new();
    let out = lex("x = @;\ny = \"open\nz = \"\\q\";\nw = 99999999999999999999;", &interner);

    let error_kinds: Vec<LexErrorKind> = out.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        error_kinds,
        vec![
            LexErrorKind::InvalidCharacter { found: '@' },
            LexErrorKind::UnterminatedString,
            LexErrorKind::InvalidEscape { escape_char: 'q' },
            LexErrorKind::IntOverflow,
        ]
    );
    let error_lines: Vec<u32> = out.errors.iter().map(|e| e.line()).collect();
    assert_eq!(error_lines, vec![1, 2, 3, 4]);
    assert_eq!(
        out.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Error)
            .count(),
        4
    );
}

#[test]
fn unterminated_block_comment() {
    let interner = StringInterner::new();
    let out = lex("a /* never closed", &interner);
    assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedComment);
    assert_eq!(out.errors[0].to_string(), "line 1: unterminated block comment");
}

#[test]
fn cursor_implements_token_source() {
    let interner = StringInterner::new();
    let out = lex("Name { }", &interner);
    let mut cursor = Cursor::new(&out.tokens);

    assert_eq!(cursor.current_kind(), TokenKind::Ident(interner.intern("Name")));
    assert!(cursor.is_block_start_following());
    assert_eq!(cursor.advance(), TokenKind::LBrace);
    assert!(!cursor.is_block_start_following());
    assert_eq!(cursor.advance(), TokenKind::RBrace);
    assert_eq!(cursor.advance(), TokenKind::Eof);
    // Advancing past the end stays on Eof.
    assert_eq!(cursor.advance(), TokenKind::Eof);
    assert_eq!(cursor.line(), 1);
}
