//! Expression parsing.
//!
//! The precedence cascade, loosest to tightest:
//!
//! ```text
//! expression → assignment
//! assignment → ( call "." )? IDENTIFIER "=" assignment | logic_or
//! logic_or   → logic_and ( "or" logic_and )*
//! logic_and  → equality ( "and" equality )*
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | call
//! call       → primary ( "(" arguments? ")" | "." IDENTIFIER )*
//! primary    → literal | "this" | "super" "." IDENTIFIER | IDENTIFIER
//!            | "(" expression ")"
//! ```
//!
//! Assignment is parsed by treating the left-hand side as an ordinary
//! expression and converting it once `=` is seen. A target that is neither
//! a variable nor a property access is reported without unwinding, and the
//! left-hand side stands in for the whole expression.

use lox_diagnostic::ErrorCode;
use lox_ir::{BinaryOp, Expr, ExprId, ExprKind, LiteralValue, LogicalOp, Span, TokenKind, UnaryOp};
use lox_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

/// Lox caps call arguments and function parameters at 255.
pub(crate) const MAX_ARITY: usize = 255;

impl Parser<'_> {
    /// Parse a single expression.
    ///
    /// Grows the stack when needed, so pathologically nested input like
    /// `((((...1...))))` cannot overflow it.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.parse_or()?;

        if self.check(TokenKind::Eq) {
            let eq_span = self.current_span();
            self.advance();
            let value = self.parse_assignment()?;

            let target = self.ast.expr(expr);
            match target.kind {
                ExprKind::Variable(name) => {
                    let span = target.span.merge(self.ast.expr(value).span);
                    return Ok(self
                        .ast
                        .alloc_expr(Expr::new(ExprKind::Assign { name, value }, span)));
                }
                ExprKind::Get {
                    object,
                    name,
                    name_span,
                } => {
                    let span = target.span.merge(self.ast.expr(value).span);
                    return Ok(self.ast.alloc_expr(Expr::new(
                        ExprKind::Set {
                            object,
                            name,
                            name_span,
                            value,
                        },
                        span,
                    )));
                }
                _ => {
                    // Reported at the `=` token; the right-hand side was
                    // already consumed, so parsing resumes cleanly after it.
                    self.report(ParseError::new(
                        ErrorCode::E1003,
                        "Invalid assignment target.",
                        eq_span,
                    ));
                }
            }
        }

        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_and()?;
        while self.check(TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            let span = self.ast.expr(expr).span.merge(self.ast.expr(right).span);
            expr = self.ast.alloc_expr(Expr::new(
                ExprKind::Logical {
                    op: LogicalOp::Or,
                    left: expr,
                    right,
                },
                span,
            ));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_equality()?;
        while self.check(TokenKind::And) {
            self.advance();
            let right = self.parse_equality()?;
            let span = self.ast.expr(expr).span.merge(self.ast.expr(right).span);
            expr = self.ast.alloc_expr(Expr::new(
                ExprKind::Logical {
                    op: LogicalOp::And,
                    left: expr,
                    right,
                },
                span,
            ));
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            let op_span = self.current_span();
            self.advance();
            let right = self.parse_comparison()?;
            expr = self.alloc_binary(op, op_span, expr, right);
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_term()?;
        while let Some(op) = self.match_comparison_op() {
            let op_span = self.current_span();
            self.advance();
            let right = self.parse_term()?;
            expr = self.alloc_binary(op, op_span, expr, right);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_factor()?;
        while let Some(op) = self.match_term_op() {
            let op_span = self.current_span();
            self.advance();
            let right = self.parse_factor()?;
            expr = self.alloc_binary(op, op_span, expr, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_unary()?;
        while let Some(op) = self.match_factor_op() {
            let op_span = self.current_span();
            self.advance();
            let right = self.parse_unary()?;
            expr = self.alloc_binary(op, op_span, expr, right);
        }
        Ok(expr)
    }

    fn alloc_binary(&mut self, op: BinaryOp, op_span: Span, left: ExprId, right: ExprId) -> ExprId {
        let span = self.ast.expr(left).span.merge(self.ast.expr(right).span);
        self.ast.alloc_expr(Expr::new(
            ExprKind::Binary {
                op,
                op_span,
                left,
                right,
            },
            span,
        ))
    }

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::BangEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Greater => Some(BinaryOp::Gt),
            TokenKind::GreaterEq => Some(BinaryOp::GtEq),
            TokenKind::Less => Some(BinaryOp::Lt),
            TokenKind::LessEq => Some(BinaryOp::LtEq),
            _ => None,
        }
    }

    fn match_term_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_factor_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let op_span = self.current_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = op_span.merge(self.ast.expr(operand).span);
            return Ok(self
                .ast
                .alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)));
        }
        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(TokenKind::LParen) {
                self.advance();
                expr = self.finish_call(expr)?;
            } else if self.check(TokenKind::Dot) {
                self.advance();
                let (name, name_span) = self.expect_ident("Expect property name after '.'.")?;
                let span = self.ast.expr(expr).span.merge(name_span);
                expr = self.ast.alloc_expr(Expr::new(
                    ExprKind::Get {
                        object: expr,
                        name,
                        name_span,
                    },
                    span,
                ));
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse the argument list and closing paren of a call. The opening
    /// paren is already consumed.
    fn finish_call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if args.len() >= MAX_ARITY {
                    // Reported without unwinding; the oversized call still
                    // parses so later arguments get checked too.
                    self.report(ParseError::new(
                        ErrorCode::E1004,
                        "Can't have more than 255 arguments.",
                        self.current_span(),
                    ));
                }
                args.push(self.parse_expr()?);
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let paren = self.expect(TokenKind::RParen, "Expect ')' after arguments.")?;

        let args = self.ast.alloc_expr_list(&args);
        let span = self.ast.expr(callee).span.merge(paren.span);
        Ok(self
            .ast
            .alloc_expr(Expr::new(ExprKind::Call { callee, args }, span)))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        trace!(
            pos = self.cursor.position(),
            kind = self.current_kind().display_name(),
            "parse_primary"
        );

        let token = self.current();
        match token.kind {
            TokenKind::False => {
                self.advance();
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Literal(LiteralValue::Bool(false)),
                    token.span,
                )))
            }
            TokenKind::True => {
                self.advance();
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Literal(LiteralValue::Bool(true)),
                    token.span,
                )))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(self
                    .ast
                    .alloc_expr(Expr::new(ExprKind::Literal(LiteralValue::Nil), token.span)))
            }
            TokenKind::Number(bits) => {
                self.advance();
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Literal(LiteralValue::Number(bits)),
                    token.span,
                )))
            }
            TokenKind::Str(name) => {
                self.advance();
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Literal(LiteralValue::Str(name)),
                    token.span,
                )))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(self
                    .ast
                    .alloc_expr(Expr::new(ExprKind::Variable(name), token.span)))
            }
            TokenKind::This => {
                self.advance();
                Ok(self.ast.alloc_expr(Expr::new(ExprKind::This, token.span)))
            }
            TokenKind::Super => {
                self.advance();
                self.expect(TokenKind::Dot, "Expect '.' after 'super'.")?;
                let (method, method_span) = self.expect_ident("Expect superclass method name.")?;
                // The node keeps the keyword's span; see `ExprKind::Super`.
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Super { method, method_span },
                    token.span,
                )))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let paren = self.expect(TokenKind::RParen, "Expect ')' after expression.")?;
                Ok(self.ast.alloc_expr(Expr::new(
                    ExprKind::Grouping(inner),
                    token.span.merge(paren.span),
                )))
            }
            _ => Err(self.expression_expected()),
        }
    }

    #[cold]
    #[inline(never)]
    fn expression_expected(&self) -> ParseError {
        ParseError::new(ErrorCode::E1002, "Expect expression.", self.current_span())
    }
}
