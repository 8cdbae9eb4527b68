//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use lox_diagnostic::ErrorCode;
use lox_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor for navigating tokens.
///
/// Provides methods for accessing, consuming, and checking tokens during
/// parsing. Includes a `tags` slice for fast O(1) discriminant checks
/// without touching the full 16-byte `TokenKind`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    /// Dense array of discriminant tags, parallel to `tokens`.
    tags: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.tokens(),
            tags: tokens.tags(),
            pos: 0,
        }
    }

    /// Get the current position in the token stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    ///
    /// Invariant: cursor position is always valid (`0..tokens.len()`).
    /// The last token is always EOF.
    #[inline]
    pub fn current(&self) -> Token {
        debug_assert!(
            self.pos < self.tokens.len(),
            "cursor position out of bounds"
        );
        self.tokens[self.pos]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Get the discriminant tag of the current token.
    ///
    /// Reads from the dense `u8` tag array, a single byte load instead of
    /// the full 16-byte `TokenKind`.
    #[inline]
    pub fn current_tag(&self) -> u8 {
        self.tags[self.pos]
    }

    /// Get the discriminant tag of the most recently consumed token.
    ///
    /// Only meaningful after at least one `advance()`.
    #[inline]
    pub fn previous_tag(&self) -> u8 {
        debug_assert!(self.pos > 0, "no previous token at stream start");
        self.tags[self.pos - 1]
    }

    /// Check if at end of token stream.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_tag() == TokenKind::TAG_EOF
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_tag() == kind.discriminant_index()
    }

    /// Check if the current token is an identifier.
    #[inline]
    pub fn check_ident(&self) -> bool {
        self.current_tag() == TokenKind::TAG_IDENT
    }

    /// Advance to the next token and return the consumed token.
    ///
    /// The lexer always appends an EOF token, and grammar rules check the
    /// current token kind before calling `advance()`, so the parser never
    /// advances past the last token. The unconditional increment avoids a
    /// branch on every token consumption.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let current = self.pos;
        debug_assert!(
            self.pos < self.tokens.len(),
            "advance past end of token stream"
        );
        self.pos += 1;
        self.tokens[current]
    }

    /// Expect the current token to be of the given kind, advance and
    /// return it. Returns an error carrying `message` otherwise.
    ///
    /// Split into inline happy path + `#[cold]` error path so the error
    /// construction doesn't prevent LLVM from inlining the fast case.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind, message: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(message))
        }
    }

    /// Expect and consume an identifier, returning its interned name and
    /// span.
    #[inline]
    pub fn expect_ident(&mut self, message: &'static str) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.current_span();
            self.advance();
            Ok((name, span))
        } else {
            Err(self.make_expect_error(message))
        }
    }

    /// Build the error for a failed `expect()` call.
    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, message: &'static str) -> ParseError {
        ParseError::new(ErrorCode::E1001, message, self.current_span())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use lox_ir::StringInterner;

    use super::*;

    fn make_cursor(source: &str) -> Cursor<'static> {
        let interner = StringInterner::new();
        let (tokens, errors) = lox_lexer::lex(source, &interner);
        assert!(errors.is_empty());
        Cursor::new(Box::leak(Box::new(tokens)))
    }

    #[test]
    fn cursor_navigation() {
        let mut cursor = make_cursor("var x = 42;");

        assert!(cursor.check(TokenKind::Var));
        assert!(!cursor.is_at_end());

        cursor.advance();
        assert!(cursor.check_ident());

        cursor.advance();
        assert!(cursor.check(TokenKind::Eq));

        cursor.advance();
        assert!(matches!(cursor.current_kind(), TokenKind::Number(_)));

        cursor.advance();
        assert!(cursor.check(TokenKind::Semicolon));

        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn expect_success_consumes() {
        let mut cursor = make_cursor("var x");

        let token = cursor.expect(TokenKind::Var, "Expect 'var'.").unwrap();
        assert!(matches!(token.kind, TokenKind::Var));
        assert!(cursor.check_ident());
    }

    #[test]
    fn expect_failure_carries_message_and_span() {
        let mut cursor = make_cursor("var x");

        let error = cursor
            .expect(TokenKind::Semicolon, "Expect ';' after expression.")
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::E1001);
        assert_eq!(error.message, "Expect ';' after expression.");
        assert_eq!(error.span, Span::new(0, 3));
        // A failed expect does not consume the token.
        assert!(cursor.check(TokenKind::Var));
    }

    #[test]
    fn expect_ident_returns_name_and_span() {
        let interner = StringInterner::new();
        let (tokens, _) = lox_lexer::lex("answer", &interner);
        let mut cursor = Cursor::new(&tokens);

        let (name, span) = cursor.expect_ident("Expect variable name.").unwrap();
        assert_eq!(interner.lookup(name), "answer");
        assert_eq!(span, Span::new(0, 6));
    }

    #[test]
    fn previous_tag_after_advance() {
        let mut cursor = make_cursor("1;");

        cursor.advance();
        assert_eq!(cursor.previous_tag(), TokenKind::TAG_NUMBER);
        cursor.advance();
        assert_eq!(cursor.previous_tag(), TokenKind::TAG_SEMICOLON);
    }
}
