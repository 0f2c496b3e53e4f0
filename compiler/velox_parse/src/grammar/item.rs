//! Definitions: functions, classes, instants, realizations and includes.

use tracing::debug;
use velox_ir::{Name, Param, StmtId, StmtKind, TokenKind, TokenSource};
use velox_lexer::Cursor;

use crate::{ParseError, Parser};

impl<T: TokenSource> Parser<'_, T> {
    /// `function name(params) { body }`
    pub(crate) fn parse_function(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::Function)?;
        let name = self.expect_ident()?;
        let params = self.parse_params()?;

        // A function body is its own unit: loops around the definition do
        // not make `break` legal inside it.
        let body_start = self.current_span();
        let saved_depth = std::mem::replace(&mut self.loop_depth, 0);
        let stmts = self.parse_braced_stmts();
        self.loop_depth = saved_depth;
        let stmts = stmts?;

        let range = self.arena.alloc_stmt_list(stmts);
        let body_span = self.span_from(body_start);
        let body = self.alloc_stmt(StmtKind::Sequence(range), body_span);
        let params = self.arena.alloc_params(params);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Function { name, params, body }, span))
    }

    /// `( [name [= default] {, name [= default]}] )`
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params: Vec<Param> = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let span = self.current_span();
                let name = self.expect_ident()?;
                if params.iter().any(|p| p.name == name) {
                    return Err(ParseError::duplicate_parameter(span, self.name_str(name)));
                }
                let default = if self.eat(TokenKind::Eq) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                params.push(Param {
                    name,
                    default,
                    span: self.span_from(span),
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_closing(TokenKind::RParen)?;
        Ok(params)
    }

    /// `class Name { function ... }`
    pub(crate) fn parse_class(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::Class)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if !self.check(TokenKind::Function) {
                let err = self.lexical_or(|kind, span| ParseError::invalid_class_member(span, kind));
                return Err(err.with_context(format!(
                    "while parsing class `{}`",
                    self.name_str(name)
                )));
            }
            methods.push(self.parse_function()?);
        }
        self.expect_closing(TokenKind::RBrace)?;
        self.check_unique_functions(&methods)?;

        debug!(class = self.name_str(name), methods = methods.len(), "parsed class");
        let methods = self.arena.alloc_stmt_list(methods);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Class { name, methods }, span))
    }

    /// `instant Name { ... }`
    pub(crate) fn parse_instant(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::Instant)?;
        let name = self.expect_ident()?;
        let body = self.parse_braced_stmts()?;
        self.check_unique_functions(&body)?;
        let body = self.arena.alloc_stmt_list(body);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Instant { name, body }, span))
    }

    /// `Name { ... }`; the caller has seen `Ident` followed by `{`.
    pub(crate) fn parse_realize(&mut self, name: Name) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        self.advance();
        let body = self.parse_braced_stmts()?;
        self.check_unique_functions(&body)?;
        let body = self.arena.alloc_stmt_list(body);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Realize { name, body }, span))
    }

    /// Two functions of one definition may not share a name.
    fn check_unique_functions(&self, stmts: &[StmtId]) -> Result<(), ParseError> {
        let mut seen: Vec<Name> = Vec::new();
        for &id in stmts {
            let stmt = self.arena.get_stmt(id);
            if let StmtKind::Function { name, .. } = stmt.kind {
                if seen.contains(&name) {
                    return Err(ParseError::ambiguous_function_name(
                        stmt.span,
                        self.name_str(name),
                    ));
                }
                seen.push(name);
            }
        }
        Ok(())
    }

    /// `include "path";`
    ///
    /// The loader's source is lexed and parsed into this arena; its
    /// statements are spliced in place as an `Include` sequence.
    pub(crate) fn parse_include(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::Include)?;
        let TokenKind::String(path) = self.current_kind() else {
            return Err(self.error_expected("a string path"));
        };
        let path_span = self.current_span();
        self.advance();
        self.expect(TokenKind::Semicolon)?;

        let path_str = self.name_str(path);
        if self.include_stack.contains(&path) {
            return Err(ParseError::recursive_include(path_span, path_str));
        }
        let Some(loader) = self.loader else {
            return Err(ParseError::include_failed(
                path_span,
                path_str,
                "no source loader is configured",
            ));
        };
        let source = loader
            .load(path_str)
            .map_err(|e| ParseError::include_failed(path_span, path_str, e))?;

        debug!(path = path_str, bytes = source.len(), "including source");
        let lexed = velox_lexer::lex(&source, self.interner);
        let context = || format!("in file included from line {}", path_span.line);
        if let Some(error) = lexed.errors.first() {
            return Err(ParseError::from_lex_error(error).with_context(context()));
        }

        let mut nested = Parser::new(
            Cursor::new(&lexed.tokens),
            self.interner,
            self.loader,
            std::mem::take(&mut self.arena),
        );
        nested.include_stack = std::mem::take(&mut self.include_stack);
        nested.include_stack.push(path);
        let result = nested.parse_stmts_until(TokenKind::Eof);
        self.arena = nested.arena;
        self.include_stack = nested.include_stack;
        self.include_stack.pop();

        let stmts = result.map_err(|e| e.with_context(context()))?;
        let body = self.arena.alloc_stmt_list(stmts);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Include { path, body }, span))
    }
}
