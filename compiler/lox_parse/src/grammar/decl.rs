//! Declaration parsing.
//!
//! ```text
//! declaration → classDecl | funDecl | varDecl | statement
//! classDecl   → "class" IDENTIFIER ( "<" IDENTIFIER )? "{" function* "}"
//! funDecl     → "fun" function
//! function    → IDENTIFIER "(" parameters? ")" block
//! varDecl     → "var" IDENTIFIER ( "=" expression )? ";"
//! ```

use lox_diagnostic::ErrorCode;
use lox_ir::{
    Expr, ExprId, ExprKind, FunctionDecl, FunctionId, Stmt, StmtId, StmtKind, TokenKind,
};
use lox_stack::ensure_sufficient_stack;
use tracing::debug;

use super::expr::MAX_ARITY;
use crate::{ParseError, Parser};

/// Which kind of function is being parsed. Only changes the wording of
/// error messages.
#[derive(Clone, Copy)]
enum FunctionKind {
    Function,
    Method,
}

impl FunctionKind {
    fn name_message(self) -> &'static str {
        match self {
            FunctionKind::Function => "Expect function name.",
            FunctionKind::Method => "Expect method name.",
        }
    }

    fn paren_message(self) -> &'static str {
        match self {
            FunctionKind::Function => "Expect '(' after function name.",
            FunctionKind::Method => "Expect '(' after method name.",
        }
    }

    fn body_message(self) -> &'static str {
        match self {
            FunctionKind::Function => "Expect '{' before function body.",
            FunctionKind::Method => "Expect '{' before method body.",
        }
    }
}

impl Parser<'_> {
    /// Parse a single declaration.
    ///
    /// Grows the stack when needed: blocks recurse through declarations,
    /// so deeply nested braces land here again.
    pub(crate) fn parse_declaration(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_declaration_inner())
    }

    fn parse_declaration_inner(&mut self) -> Result<StmtId, ParseError> {
        debug!(
            pos = self.cursor.position(),
            kind = self.current_kind().display_name(),
            "parse_declaration"
        );

        match self.current_tag() {
            TokenKind::TAG_CLASS => self.parse_class_declaration(),
            TokenKind::TAG_FUN => self.parse_fun_declaration(),
            TokenKind::TAG_VAR => self.parse_var_declaration(),
            _ => self.parse_statement(),
        }
    }

    fn parse_class_declaration(&mut self) -> Result<StmtId, ParseError> {
        let class_span = self.current_span();
        self.advance();

        let (name, name_span) = self.expect_ident("Expect class name.")?;

        // A superclass clause parses as a variable reference so the
        // resolver and interpreter can treat it like any other name.
        let superclass = if self.check(TokenKind::Less) {
            self.advance();
            let (super_name, super_span) = self.expect_ident("Expect superclass name.")?;
            self.ast
                .alloc_expr(Expr::new(ExprKind::Variable(super_name), super_span))
        } else {
            ExprId::INVALID
        };

        self.expect(TokenKind::LBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            methods.push(self.parse_function(FunctionKind::Method)?);
        }

        let brace = self.expect(TokenKind::RBrace, "Expect '}' after class body.")?;
        let methods = self.ast.alloc_function_list(&methods);
        Ok(self.ast.alloc_stmt(Stmt::new(
            StmtKind::Class {
                name,
                name_span,
                superclass,
                methods,
            },
            class_span.merge(brace.span),
        )))
    }

    fn parse_fun_declaration(&mut self) -> Result<StmtId, ParseError> {
        let fun_span = self.current_span();
        self.advance();

        let function = self.parse_function(FunctionKind::Function)?;
        // The closing brace of the body is the previous token here.
        let span = fun_span.merge(self.previous_span());
        Ok(self
            .ast
            .alloc_stmt(Stmt::new(StmtKind::Function(function), span)))
    }

    /// Parse a function's name, parameters, and body. Shared between `fun`
    /// declarations and class methods.
    fn parse_function(&mut self, kind: FunctionKind) -> Result<FunctionId, ParseError> {
        let (name, name_span) = self.expect_ident(kind.name_message())?;
        self.expect(TokenKind::LParen, kind.paren_message())?;

        let mut params = Vec::new();
        let mut param_spans = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if params.len() >= MAX_ARITY {
                    // Reported without unwinding, matching the call
                    // argument cap.
                    self.report(ParseError::new(
                        ErrorCode::E1004,
                        "Can't have more than 255 parameters.",
                        self.current_span(),
                    ));
                }
                let (param, param_span) = self.expect_ident("Expect parameter name.")?;
                params.push(param);
                param_spans.push(param_span);

                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "Expect ')' after parameters.")?;

        self.expect(TokenKind::LBrace, kind.body_message())?;
        let body = self.parse_block_stmts()?;
        let body = self.ast.alloc_stmt_list(&body);

        Ok(self.ast.alloc_function(FunctionDecl {
            name,
            params,
            param_spans,
            body,
            name_span,
        }))
    }

    /// Parse a variable declaration. The `var` keyword is the current
    /// token.
    pub(crate) fn parse_var_declaration(&mut self) -> Result<StmtId, ParseError> {
        let var_span = self.current_span();
        self.advance();

        let (name, name_span) = self.expect_ident("Expect variable name.")?;

        let init = if self.check(TokenKind::Eq) {
            self.advance();
            self.parse_expr()?
        } else {
            ExprId::INVALID
        };

        let semi = self.expect(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(self.ast.alloc_stmt(Stmt::new(
            StmtKind::Var {
                name,
                name_span,
                init,
            },
            var_span.merge(semi.span),
        )))
    }
}
