//! Recursive descent parser for Lox.
//!
//! Consumes the token list from `lox_lexer` and produces a flat [`Ast`]
//! plus the program's top-level statements in source order. The parser
//! does not stop at the first mistake: an error inside a declaration
//! unwinds via `Result`, gets recorded, and [`synchronize`] skips ahead
//! to the next statement boundary before parsing resumes. One pass
//! therefore reports every independent error.

mod cursor;
mod display;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use display::AstPrinter;
pub use recovery::{DECL_START, TokenSet, synchronize};

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{Ast, Name, Span, StmtId, Token, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ast: Ast,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token list.
    pub fn new(tokens: &'a TokenList) -> Self {
        // The EOF token sits one past the last source byte, so its span is
        // a cheap stand-in for the source length when sizing the arena.
        let source_len = tokens
            .tokens()
            .last()
            .map_or(0, |token| token.span.end as usize);
        Parser {
            cursor: Cursor::new(tokens),
            ast: Ast::with_capacity(source_len),
            errors: Vec::new(),
        }
    }

    // Cursor delegation, so grammar code reads `self.advance()` rather
    // than `self.cursor.advance()`.

    #[inline]
    fn current(&self) -> Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn current_tag(&self) -> u8 {
        self.cursor.current_tag()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind, message: &'static str) -> Result<Token, ParseError> {
        self.cursor.expect(kind, message)
    }

    #[inline]
    fn expect_ident(&mut self, message: &'static str) -> Result<(Name, Span), ParseError> {
        self.cursor.expect_ident(message)
    }

    /// Parse the whole program: declarations until end of input.
    pub fn parse_program(mut self) -> ParseResult {
        let mut roots = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration_or_recover() {
                roots.push(stmt);
            }
        }

        ParseResult {
            ast: self.ast,
            roots,
            errors: self.errors,
        }
    }

    /// Parse one declaration. On error, record it and skip to the next
    /// statement boundary; returns `None` for the abandoned declaration.
    fn parse_declaration_or_recover(&mut self) -> Option<StmtId> {
        match self.parse_declaration() {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.report(error);
                synchronize(&mut self.cursor, DECL_START);
                None
            }
        }
    }

    /// Record an error without abandoning the current production.
    fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}

/// Everything produced by one parse: the arena, the top-level statements
/// in source order, and any errors.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseResult {
    pub ast: Ast,
    pub roots: Vec<StmtId>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse error with a stable code for diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Convert to a full `Diagnostic` for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

/// Parse tokens into a program.
pub fn parse(tokens: &TokenList) -> ParseResult {
    Parser::new(tokens).parse_program()
}
