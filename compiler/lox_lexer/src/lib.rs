//! Scanner for Lox using logos with string interning.
//!
//! [`lex`] makes a single left-to-right pass over the source and produces a
//! [`TokenList`] plus any scanner errors. Errors are accumulated, not
//! raised: an unrecognized character records a [`LexError`] and scanning
//! continues, so one run reports every lexical problem it can find. The
//! list always ends with an `Eof` token whose span sits one past the last
//! source byte.

use logos::Logos;
use lox_ir::{Span, StringInterner, Token, TokenKind, TokenList};

mod lex_error;

pub use lex_error::{LexError, LexErrorKind};

/// Consume a block comment body, tracking `/* */` nesting.
///
/// Called after the opening `/*` has been matched. Bumps the lexer past the
/// matching close and returns true, or consumes to end of input and returns
/// false when the comment is unterminated.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                depth += 1;
                i += 2;
            }
            b'*' if bytes.get(i + 1) == Some(&b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return true;
                }
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    false
}

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Whole block comment, including nested ones. The callback fails the
    /// match (producing an error token) when the comment never closes.
    #[token("/*", block_comment)]
    BlockComment,

    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    #[token("!=")]
    BangEq,
    #[token("!")]
    Bang,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token(">=")]
    GreaterEq,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEq,
    #[token("<")]
    Less,

    // Number: integer with optional fraction. `123.` lexes as the number
    // 123 followed by a dot; the fraction requires at least one digit.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // String literal. No escapes; newlines are allowed inside.
    #[regex(r#""[^"]*""#)]
    Str,

    // A string opened but never closed runs to end of input.
    #[regex(r#""[^"]*"#)]
    UnterminatedStr,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`, accumulating scanner errors.
pub fn lex(source: &str, interner: &StringInterner) -> (TokenList, Vec<LexError>) {
    let mut result = TokenList::with_capacity(source.len() / 4);
    let mut errors = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => match raw {
                // Trivia
                RawToken::LineComment | RawToken::BlockComment => {}
                RawToken::UnterminatedStr => {
                    errors.push(LexError::unterminated_string(span));
                    result.push(Token::new(TokenKind::Error, span));
                }
                _ => {
                    let kind = convert_token(raw, slice, interner);
                    result.push(Token::new(kind, span));
                }
            },
            Err(()) => {
                if slice.starts_with("/*") {
                    errors.push(LexError::unterminated_block_comment(span));
                } else {
                    let found = slice.chars().next().unwrap_or('\u{FFFD}');
                    errors.push(LexError::unexpected_character(span, found));
                }
                result.push(Token::new(TokenKind::Error, span));
            }
        }
    }

    // Add EOF token
    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source exceeds {} bytes", u32::MAX));
    result.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    (result, errors)
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        // Literals
        RawToken::Number(n) => TokenKind::Number(n.to_bits()),
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(content))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        // Keywords
        RawToken::And => TokenKind::And,
        RawToken::Class => TokenKind::Class,
        RawToken::Else => TokenKind::Else,
        RawToken::False => TokenKind::False,
        RawToken::For => TokenKind::For,
        RawToken::Fun => TokenKind::Fun,
        RawToken::If => TokenKind::If,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Or => TokenKind::Or,
        RawToken::Print => TokenKind::Print,
        RawToken::Return => TokenKind::Return,
        RawToken::Super => TokenKind::Super,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::Var => TokenKind::Var,
        RawToken::While => TokenKind::While,

        // Punctuation
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Star => TokenKind::Star,

        // Operators
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEq => TokenKind::GreaterEq,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEq => TokenKind::LessEq,

        // Trivia and error forms (handled in `lex`)
        RawToken::LineComment | RawToken::BlockComment | RawToken::UnterminatedStr => {
            unreachable!("trivia is handled separately")
        }
    }
}
