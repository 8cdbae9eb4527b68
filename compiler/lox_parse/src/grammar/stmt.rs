//! Statement parsing.
//!
//! ```text
//! statement  → exprStmt | forStmt | ifStmt | printStmt | returnStmt
//!            | whileStmt | block
//! forStmt    → "for" "(" ( varDecl | exprStmt | ";" )
//!              expression? ";" expression? ")" statement
//! ```
//!
//! `for` has no node of its own. It desugars here into the equivalent
//! `while` loop, so every later stage sees only core forms:
//!
//! ```text
//! for (var i = 0; i < n; i = i + 1) body;
//! // becomes
//! { var i = 0; while (i < n) { body; i = i + 1; } }
//! ```

use lox_ir::{Expr, ExprId, ExprKind, LiteralValue, Stmt, StmtId, StmtKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        match self.current_tag() {
            TokenKind::TAG_FOR => self.parse_for_statement(),
            TokenKind::TAG_IF => self.parse_if_statement(),
            TokenKind::TAG_PRINT => self.parse_print_statement(),
            TokenKind::TAG_RETURN => self.parse_return_statement(),
            TokenKind::TAG_WHILE => self.parse_while_statement(),
            TokenKind::TAG_LBRACE => self.parse_block_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_for_statement(&mut self) -> Result<StmtId, ParseError> {
        let for_span = self.current_span();
        self.advance();
        self.expect(TokenKind::LParen, "Expect '(' after 'for'.")?;

        let initializer = match self.current_tag() {
            TokenKind::TAG_SEMICOLON => {
                self.advance();
                StmtId::INVALID
            }
            TokenKind::TAG_VAR => self.parse_var_declaration()?,
            _ => self.parse_expression_statement()?,
        };

        let condition = if self.check(TokenKind::Semicolon) {
            ExprId::INVALID
        } else {
            self.parse_expr()?
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RParen) {
            ExprId::INVALID
        } else {
            self.parse_expr()?
        };
        self.expect(TokenKind::RParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_statement()?;

        // Desugar back to front: append the increment to the body, default
        // a missing condition to `true`, wrap in `while`, then prepend the
        // initializer inside an enclosing block.
        if increment.is_valid() {
            let incr_span = self.ast.expr(increment).span;
            let incr_stmt = self
                .ast
                .alloc_stmt(Stmt::new(StmtKind::Expression(increment), incr_span));
            let body_span = self.ast.stmt(body).span;
            let range = self.ast.alloc_stmt_list(&[body, incr_stmt]);
            body = self
                .ast
                .alloc_stmt(Stmt::new(StmtKind::Block(range), body_span.merge(incr_span)));
        }

        let cond = if condition.is_valid() {
            condition
        } else {
            self.ast.alloc_expr(Expr::new(
                ExprKind::Literal(LiteralValue::Bool(true)),
                for_span,
            ))
        };

        let loop_span = for_span.merge(self.ast.stmt(body).span);
        let mut stmt = self
            .ast
            .alloc_stmt(Stmt::new(StmtKind::While { cond, body }, loop_span));

        if initializer.is_valid() {
            let range = self.ast.alloc_stmt_list(&[initializer, stmt]);
            stmt = self.ast.alloc_stmt(Stmt::new(StmtKind::Block(range), loop_span));
        }

        Ok(stmt)
    }

    fn parse_if_statement(&mut self) -> Result<StmtId, ParseError> {
        let if_span = self.current_span();
        self.advance();
        self.expect(TokenKind::LParen, "Expect '(' after 'if'.")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expect ')' after if condition.")?;

        let then_branch = self.parse_statement()?;
        // `else` binds to the nearest `if`.
        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            self.parse_statement()?
        } else {
            StmtId::INVALID
        };

        let end = if else_branch.is_valid() {
            self.ast.stmt(else_branch).span
        } else {
            self.ast.stmt(then_branch).span
        };
        Ok(self.ast.alloc_stmt(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            if_span.merge(end),
        )))
    }

    fn parse_print_statement(&mut self) -> Result<StmtId, ParseError> {
        let print_span = self.current_span();
        self.advance();
        let value = self.parse_expr()?;
        let semi = self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(self
            .ast
            .alloc_stmt(Stmt::new(StmtKind::Print(value), print_span.merge(semi.span))))
    }

    fn parse_return_statement(&mut self) -> Result<StmtId, ParseError> {
        let keyword_span = self.current_span();
        self.advance();
        let value = if self.check(TokenKind::Semicolon) {
            ExprId::INVALID
        } else {
            self.parse_expr()?
        };
        let semi = self.expect(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(self.ast.alloc_stmt(Stmt::new(
            StmtKind::Return { keyword_span, value },
            keyword_span.merge(semi.span),
        )))
    }

    fn parse_while_statement(&mut self) -> Result<StmtId, ParseError> {
        let while_span = self.current_span();
        self.advance();
        self.expect(TokenKind::LParen, "Expect '(' after 'while'.")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expect ')' after condition.")?;

        let body = self.parse_statement()?;
        let span = while_span.merge(self.ast.stmt(body).span);
        Ok(self
            .ast
            .alloc_stmt(Stmt::new(StmtKind::While { cond, body }, span)))
    }

    fn parse_block_statement(&mut self) -> Result<StmtId, ParseError> {
        let brace_span = self.current_span();
        self.advance();
        let stmts = self.parse_block_stmts()?;
        let range = self.ast.alloc_stmt_list(&stmts);
        let span = brace_span.merge(self.previous_span());
        Ok(self.ast.alloc_stmt(Stmt::new(StmtKind::Block(range), span)))
    }

    /// Parse declarations up to and including the closing `}`. The opening
    /// brace is already consumed. Errors inside the block recover to the
    /// next statement boundary instead of abandoning the block.
    pub(crate) fn parse_block_stmts(&mut self) -> Result<Vec<StmtId>, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration_or_recover() {
                stmts.push(stmt);
            }
        }
        self.expect(TokenKind::RBrace, "Expect '}' after block.")?;
        Ok(stmts)
    }

    fn parse_expression_statement(&mut self) -> Result<StmtId, ParseError> {
        let expr = self.parse_expr()?;
        let expr_span = self.ast.expr(expr).span;
        let semi = self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(self.ast.alloc_stmt(Stmt::new(
            StmtKind::Expression(expr),
            expr_span.merge(semi.span),
        )))
    }
}
