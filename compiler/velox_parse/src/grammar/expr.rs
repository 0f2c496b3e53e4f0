//! Expression parsing.
//!
//! Precedence, lowest to highest:
//! logical (`&&` `||`, one left-associative level) → relational
//! (non-chaining) → additive → multiplicative → unary (`-` `!`, prefix
//! `++`/`--`) → postfix selectors (`.name`, `[index]`, `(args)`, postfix
//! `++`/`--`) → primary.

use velox_diagnostic::ErrorCode;
use velox_ir::{
    BinaryOp, Expr, ExprId, ExprKind, ExprRange, TokenKind, TokenSource, UnaryOp, UpdateOp,
};
use velox_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl<T: TokenSource> Parser<'_, T> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_logical())
    }

    fn match_logical_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }

    fn match_relational_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn match_update_op(&self) -> Option<UpdateOp> {
        match self.current_kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.expr_span(left).merge(self.expr_span(right));
        self.alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    /// `&&` and `||` (short-circuit, left-associative).
    fn parse_logical(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_relational()?;
        while let Some(op) = self.match_logical_op() {
            self.advance();
            let right = self.parse_relational()?;
            left = self.alloc_binary(op, left, right);
        }
        Ok(left)
    }

    /// At most one relational operator: `a < b < c` is rejected.
    fn parse_relational(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_additive()?;
        let Some(op) = self.match_relational_op() else {
            return Ok(left);
        };
        self.advance();
        let right = self.parse_additive()?;
        if self.match_relational_op().is_some() {
            return Err(ParseError::new(
                ErrorCode::E1001,
                format!(
                    "relational operators cannot be chained: `{}` after `{}`",
                    self.current_kind().display_name(),
                    op.as_symbol()
                ),
                self.current_span(),
            ));
        }
        Ok(self.alloc_binary(op, left, right))
    }

    /// Additive level. Vector and color components are parsed here so
    /// their closing `>` / `|` is not taken as an operator.
    pub(crate) fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.alloc_binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = self.alloc_binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        if let Some(op) = self.match_update_op() {
            self.advance();
            let target = self.parse_postfix()?;
            self.require_location(target)?;
            let span = start.merge(self.expr_span(target));
            return Ok(self.alloc_expr(Expr::new(
                ExprKind::Update {
                    op,
                    target,
                    postfix: false,
                },
                span,
            )));
        }
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.expr_span(operand));
        Ok(self.alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    pub(crate) fn require_location(&self, id: ExprId) -> Result<(), ParseError> {
        let expr = self.arena.get_expr(id);
        if expr.kind.is_location() {
            Ok(())
        } else {
            Err(ParseError::lvalue_required(expr.span))
        }
    }

    /// Selector chain: `.name`, `[index]`, `(args)`, then optional postfix `++`/`--`.
    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let start = self.expr_span(expr);
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_ident()?;
                    let span = self.span_from(start);
                    expr = self.alloc_expr(Expr::new(
                        ExprKind::Member {
                            receiver: expr,
                            name,
                        },
                        span,
                    ));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect_closing(TokenKind::RBracket)?;
                    let span = self.span_from(start);
                    expr = self.alloc_expr(Expr::new(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                        },
                        span,
                    ));
                }
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    let span = self.span_from(start);
                    expr = self.alloc_expr(Expr::new(
                        ExprKind::Call { callee: expr, args },
                        span,
                    ));
                }
                _ => {
                    let Some(op) = self.match_update_op() else {
                        return Ok(expr);
                    };
                    self.require_location(expr)?;
                    self.advance();
                    let span = self.span_from(start);
                    return Ok(self.alloc_expr(Expr::new(
                        ExprKind::Update {
                            op,
                            target: expr,
                            postfix: true,
                        },
                        span,
                    )));
                }
            }
        }
    }

    /// `( [expr {, expr}] )`
    fn parse_args(&mut self) -> Result<ExprRange, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_closing(TokenKind::RParen)?;
        Ok(self.arena.alloc_expr_list(args))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => {
                self.advance();
                ExprKind::Int(n)
            }
            TokenKind::Real(bits) => {
                self.advance();
                ExprKind::Real(bits)
            }
            TokenKind::String(name) => {
                self.advance();
                ExprKind::Str(name)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Undefined => {
                self.advance();
                ExprKind::Undefined
            }
            TokenKind::Ident(name) => {
                self.advance();
                ExprKind::Ident(name)
            }
            TokenKind::This => {
                self.advance();
                ExprKind::This
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_closing(TokenKind::RParen)?;
                // Parentheses only group; the inner node keeps its kind.
                return Ok(inner);
            }
            TokenKind::New => {
                self.advance();
                let class = self.expect_ident()?;
                let args = self.parse_args()?;
                ExprKind::New { class, args }
            }
            TokenKind::Pipe => self.parse_color()?,
            TokenKind::Lt => {
                self.advance();
                let x = self.parse_additive()?;
                self.expect(TokenKind::Comma)?;
                let y = self.parse_additive()?;
                self.expect_closing(TokenKind::Gt)?;
                ExprKind::Vector { x, y }
            }
            TokenKind::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                if !self.check(TokenKind::RBracket) {
                    loop {
                        elements.push(self.parse_expr()?);
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect_closing(TokenKind::RBracket)?;
                ExprKind::List(self.arena.alloc_expr_list(elements))
            }
            _ => {
                return Err(
                    self.lexical_or(|kind, span| ParseError::expected_expression(span, kind))
                )
            }
        };
        let span = self.span_from(start);
        Ok(self.alloc_expr(Expr::new(kind, span)))
    }

    /// `|r,g,b|`, `|r,g,b,a|` or packed `|rgb|`.
    fn parse_color(&mut self) -> Result<ExprKind, ParseError> {
        let open = self.expect(TokenKind::Pipe)?;
        let mut components = Vec::with_capacity(4);
        loop {
            components.push(self.parse_additive()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::Pipe)?;
        if !matches!(components.len(), 1 | 3 | 4) {
            return Err(ParseError::new(
                ErrorCode::E1001,
                format!(
                    "color literal takes 1, 3 or 4 components, found {}",
                    components.len()
                ),
                self.span_from(open),
            ));
        }
        Ok(ExprKind::Color(self.arena.alloc_expr_list(components)))
    }
}
