//! Statement parsing.

use velox_ir::{AssignOp, ExprId, Name, StmtId, StmtKind, TokenKind, TokenSource};
use velox_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl<T: TokenSource> Parser<'_, T> {
    /// Parse the whole stream as the root `Sequence`.
    pub(crate) fn parse_program(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let stmts = self.parse_stmts_until(TokenKind::Eof)?;
        let range = self.arena.alloc_stmt_list(stmts);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Sequence(range), span))
    }

    /// Statements up to (not including) `end` or end of input.
    pub(crate) fn parse_stmts_until(&mut self, end: TokenKind) -> Result<Vec<StmtId>, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(end) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    /// `{ stmts }`
    pub(crate) fn parse_braced_stmts(&mut self) -> Result<Vec<StmtId>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let stmts = self.parse_stmts_until(TokenKind::RBrace)?;
        self.expect_closing(TokenKind::RBrace)?;
        Ok(stmts)
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance();
                Ok(self.alloc_stmt(StmtKind::Empty, start))
            }
            TokenKind::LBrace => {
                let stmts = self.parse_braced_stmts()?;
                let range = self.arena.alloc_stmt_list(stmts);
                let span = self.span_from(start);
                Ok(self.alloc_stmt(StmtKind::Block(range), span))
            }
            TokenKind::Function => self.parse_function(),
            TokenKind::Class => self.parse_class(),
            TokenKind::Instant => self.parse_instant(),
            TokenKind::Include => self.parse_include(),
            TokenKind::Ident(name) if self.tokens.is_block_start_following() => {
                self.parse_realize(name)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Loop => {
                self.advance();
                let body = self.parse_loop_body()?;
                let span = self.span_from(start);
                Ok(self.alloc_stmt(StmtKind::Loop { body }, span))
            }
            keyword @ (TokenKind::Break | TokenKind::Continue) => {
                if self.loop_depth == 0 {
                    return Err(ParseError::outside_loop(start, keyword));
                }
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                let kind = if keyword == TokenKind::Break {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                };
                Ok(self.alloc_stmt(kind, start))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(TokenKind::Semicolon)?;
                let span = self.span_from(start);
                Ok(self.alloc_stmt(StmtKind::Return(value), span))
            }
            TokenKind::Global => {
                self.advance();
                let name = self.expect_ident()?;
                self.expect(TokenKind::Semicolon)?;
                let span = self.span_from(start);
                Ok(self.alloc_stmt(StmtKind::Global(name), span))
            }
            TokenKind::Error => Err(ParseError::invalid_token(start)),
            _ => {
                let stmt = self.parse_simple_stmt()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(stmt)
            }
        }
    }

    /// Expression, assignment or `var` declaration without the trailing `;`.
    ///
    /// Also used for the init and step clauses of `for`.
    fn parse_simple_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        if self.eat(TokenKind::Var) {
            let name: Name = self.expect_ident()?;
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            let span = self.span_from(start);
            return Ok(self.alloc_stmt(StmtKind::Var { name, init }, span));
        }

        let target = self.parse_expr()?;
        let Some(op) = self.match_assign_op() else {
            let span = self.expr_span(target);
            return Ok(self.alloc_stmt(StmtKind::Expr(target), span));
        };
        self.require_location(target)?;
        self.advance();
        let value = self.parse_expr()?;
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::Assign { target, op, value }, span))
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        match self.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::Add),
            TokenKind::MinusEq => Some(AssignOp::Sub),
            TokenKind::StarEq => Some(AssignOp::Mul),
            TokenKind::SlashEq => Some(AssignOp::Div),
            TokenKind::PercentEq => Some(AssignOp::Mod),
            _ => None,
        }
    }

    /// `( expr )`
    fn parse_condition(&mut self) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect_closing(TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_loop_body(&mut self) -> Result<StmtId, ParseError> {
        self.loop_depth += 1;
        let body = self.parse_stmt();
        self.loop_depth -= 1;
        body
    }

    fn parse_if(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::If)?;
        let cond = self.parse_condition()?;
        let then_branch = self.parse_stmt()?;
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.parse_stmt()?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(self.alloc_stmt(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    fn parse_while(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::While)?;
        let cond = self.parse_condition()?;
        let body = self.parse_loop_body()?;
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::While { cond, body }, span))
    }

    fn parse_do_while(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::Do)?;
        let body = self.parse_loop_body()?;
        self.expect(TokenKind::While)?;
        let cond = self.parse_condition()?;
        self.expect(TokenKind::Semicolon)?;
        let span = self.span_from(start);
        Ok(self.alloc_stmt(StmtKind::DoWhile { body, cond }, span))
    }

    /// `for ( [init] ; [cond] ; [step] ) body`
    fn parse_for(&mut self) -> Result<StmtId, ParseError> {
        let start = self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;
        let init = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_simple_stmt()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let step = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_simple_stmt()?)
        };
        self.expect_closing(TokenKind::RParen)?;
        let body = self.parse_loop_body()?;
        let span = self.span_from(start);
        Ok(self.alloc_stmt(
            StmtKind::For {
                init,
                cond,
                step,
                body,
            },
            span,
        ))
    }
}
