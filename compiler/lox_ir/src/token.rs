//! Token types for the Lox scanner.

use super::{Name, Span};
use std::fmt;

/// A token with its span in the source.
///
/// The lexeme text and its length are recovered by slicing the source with
/// the span; row and column come from the diagnostic line table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Dense discriminant tags for `TokenKind`.
///
/// Single source of truth for the `TAG_*` constants and
/// `discriminant_index()`. Stored per token in `TokenList::tags` for O(1)
/// dispatch without touching the 16-byte `TokenKind`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
enum TokenTag {
    // Literals
    Number = 0,
    Str,
    Ident,

    // Keywords
    KwAnd,
    KwClass,
    KwElse,
    KwFalse,
    KwFor,
    KwFun,
    KwIf,
    KwNil,
    KwOr,
    KwPrint,
    KwReturn,
    KwSuper,
    KwThis,
    KwTrue,
    KwVar,
    KwWhile,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One- and two-character operators
    Bang,
    BangEq,
    Eq,
    EqEq,
    Greater,
    GreaterEq,
    Less,
    LessEq,

    // Special
    Error,
    Eof,
}

/// Token kinds for Lox.
///
/// Number literals store f64 bits as u64 so the enum stays `Eq + Hash`.
/// String and identifier text is interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Number literal: 42, 3.14 (stored as bits for Eq/Hash)
    Number(u64),
    /// String literal (interned, quotes stripped): "hello"
    Str(Name),
    /// Identifier (interned)
    Ident(Name),

    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    Bang,
    BangEq,
    Eq,
    EqEq,
    Greater,
    GreaterEq,
    Less,
    LessEq,

    /// Placeholder emitted where the scanner recorded a lexical error.
    Error,
    /// Terminal end-of-input token.
    Eof,
}

impl TokenKind {
    // Discriminant tag constants for tag-based dispatch. Use these instead
    // of magic numbers in match arms; all values derive from `TokenTag`.
    pub const TAG_NUMBER: u8 = TokenTag::Number as u8;
    pub const TAG_STR: u8 = TokenTag::Str as u8;
    pub const TAG_IDENT: u8 = TokenTag::Ident as u8;
    pub const TAG_AND: u8 = TokenTag::KwAnd as u8;
    pub const TAG_CLASS: u8 = TokenTag::KwClass as u8;
    pub const TAG_ELSE: u8 = TokenTag::KwElse as u8;
    pub const TAG_FALSE: u8 = TokenTag::KwFalse as u8;
    pub const TAG_FOR: u8 = TokenTag::KwFor as u8;
    pub const TAG_FUN: u8 = TokenTag::KwFun as u8;
    pub const TAG_IF: u8 = TokenTag::KwIf as u8;
    pub const TAG_NIL: u8 = TokenTag::KwNil as u8;
    pub const TAG_OR: u8 = TokenTag::KwOr as u8;
    pub const TAG_PRINT: u8 = TokenTag::KwPrint as u8;
    pub const TAG_RETURN: u8 = TokenTag::KwReturn as u8;
    pub const TAG_SUPER: u8 = TokenTag::KwSuper as u8;
    pub const TAG_THIS: u8 = TokenTag::KwThis as u8;
    pub const TAG_TRUE: u8 = TokenTag::KwTrue as u8;
    pub const TAG_VAR: u8 = TokenTag::KwVar as u8;
    pub const TAG_WHILE: u8 = TokenTag::KwWhile as u8;
    pub const TAG_LPAREN: u8 = TokenTag::LParen as u8;
    pub const TAG_RPAREN: u8 = TokenTag::RParen as u8;
    pub const TAG_LBRACE: u8 = TokenTag::LBrace as u8;
    pub const TAG_RBRACE: u8 = TokenTag::RBrace as u8;
    pub const TAG_COMMA: u8 = TokenTag::Comma as u8;
    pub const TAG_DOT: u8 = TokenTag::Dot as u8;
    pub const TAG_MINUS: u8 = TokenTag::Minus as u8;
    pub const TAG_PLUS: u8 = TokenTag::Plus as u8;
    pub const TAG_SEMICOLON: u8 = TokenTag::Semicolon as u8;
    pub const TAG_SLASH: u8 = TokenTag::Slash as u8;
    pub const TAG_STAR: u8 = TokenTag::Star as u8;
    pub const TAG_BANG: u8 = TokenTag::Bang as u8;
    pub const TAG_BANG_EQ: u8 = TokenTag::BangEq as u8;
    pub const TAG_EQ: u8 = TokenTag::Eq as u8;
    pub const TAG_EQ_EQ: u8 = TokenTag::EqEq as u8;
    pub const TAG_GREATER: u8 = TokenTag::Greater as u8;
    pub const TAG_GREATER_EQ: u8 = TokenTag::GreaterEq as u8;
    pub const TAG_LESS: u8 = TokenTag::Less as u8;
    pub const TAG_LESS_EQ: u8 = TokenTag::LessEq as u8;
    pub const TAG_ERROR: u8 = TokenTag::Error as u8;
    pub const TAG_EOF: u8 = TokenTag::Eof as u8;

    /// Dense u8 discriminant for tag-based dispatch.
    #[inline]
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            Self::Number(_) => TokenTag::Number as u8,
            Self::Str(_) => TokenTag::Str as u8,
            Self::Ident(_) => TokenTag::Ident as u8,
            Self::And => TokenTag::KwAnd as u8,
            Self::Class => TokenTag::KwClass as u8,
            Self::Else => TokenTag::KwElse as u8,
            Self::False => TokenTag::KwFalse as u8,
            Self::For => TokenTag::KwFor as u8,
            Self::Fun => TokenTag::KwFun as u8,
            Self::If => TokenTag::KwIf as u8,
            Self::Nil => TokenTag::KwNil as u8,
            Self::Or => TokenTag::KwOr as u8,
            Self::Print => TokenTag::KwPrint as u8,
            Self::Return => TokenTag::KwReturn as u8,
            Self::Super => TokenTag::KwSuper as u8,
            Self::This => TokenTag::KwThis as u8,
            Self::True => TokenTag::KwTrue as u8,
            Self::Var => TokenTag::KwVar as u8,
            Self::While => TokenTag::KwWhile as u8,
            Self::LParen => TokenTag::LParen as u8,
            Self::RParen => TokenTag::RParen as u8,
            Self::LBrace => TokenTag::LBrace as u8,
            Self::RBrace => TokenTag::RBrace as u8,
            Self::Comma => TokenTag::Comma as u8,
            Self::Dot => TokenTag::Dot as u8,
            Self::Minus => TokenTag::Minus as u8,
            Self::Plus => TokenTag::Plus as u8,
            Self::Semicolon => TokenTag::Semicolon as u8,
            Self::Slash => TokenTag::Slash as u8,
            Self::Star => TokenTag::Star as u8,
            Self::Bang => TokenTag::Bang as u8,
            Self::BangEq => TokenTag::BangEq as u8,
            Self::Eq => TokenTag::Eq as u8,
            Self::EqEq => TokenTag::EqEq as u8,
            Self::Greater => TokenTag::Greater as u8,
            Self::GreaterEq => TokenTag::GreaterEq as u8,
            Self::Less => TokenTag::Less as u8,
            Self::LessEq => TokenTag::LessEq as u8,
            Self::Error => TokenTag::Error as u8,
            Self::Eof => TokenTag::Eof as u8,
        }
    }

    /// Human-readable name for diagnostics.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Fun => "fun",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Var => "var",
            TokenKind::While => "while",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Greater => ">",
            TokenKind::GreaterEq => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEq => "<=",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of file",
        }
    }

    /// The f64 value of a `Number` token.
    #[inline]
    pub fn number_value(&self) -> Option<f64> {
        match self {
            TokenKind::Number(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

// Debug prints literal payloads, everything else by display name.
impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            TokenKind::Str(name) => write!(f, "Str({name:?})"),
            TokenKind::Ident(name) => write!(f, "Ident({name:?})"),
            other => write!(f, "{}", other.display_name()),
        }
    }
}

/// A list of tokens with a parallel array of discriminant tags.
///
/// `tags[i] == tokens[i].kind.discriminant_index()` for all `i`, enabling
/// O(1) tag comparison in the parser without touching the full `TokenKind`.
#[derive(Clone, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    /// Parallel array of discriminant tags, one per token.
    tags: Vec<u8>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList {
            tokens: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
            tags: Vec::with_capacity(capacity),
        }
    }

    /// Push a token.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tags.push(token.kind.discriminant_index());
        self.tokens.push(token);
    }

    /// Get the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get a token by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The tokens as a slice.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The parallel tag array.
    #[inline]
    pub fn tags(&self) -> &[u8] {
        &self.tags
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    crate::static_assert_size!(TokenKind, 16);
    crate::static_assert_size!(Token, 24);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tags_mirror_tokens() {
        let mut list = TokenList::new();
        list.push(Token::new(TokenKind::Var, Span::new(0, 3)));
        list.push(Token::new(TokenKind::Ident(Name::EMPTY), Span::new(4, 5)));
        list.push(Token::new(TokenKind::Eof, Span::point(5)));

        assert_eq!(list.len(), 3);
        assert_eq!(
            list.tags(),
            &[TokenKind::TAG_VAR, TokenKind::TAG_IDENT, TokenKind::TAG_EOF]
        );
    }

    #[test]
    fn number_round_trips_through_bits() {
        let kind = TokenKind::Number(2.5f64.to_bits());
        assert_eq!(kind.number_value(), Some(2.5));
        assert_eq!(TokenKind::Eof.number_value(), None);
    }

    #[test]
    fn discriminants_are_dense_and_distinct() {
        // Spot-check ordering across the groups.
        assert_eq!(TokenKind::TAG_NUMBER, 0);
        assert!(TokenKind::TAG_AND > TokenKind::TAG_IDENT);
        assert!(TokenKind::TAG_EOF > TokenKind::TAG_ERROR);
        assert_ne!(TokenKind::TAG_EQ, TokenKind::TAG_EQ_EQ);
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::LParen.display_name(), "(");
        assert_eq!(TokenKind::BangEq.display_name(), "!=");
        assert_eq!(TokenKind::Eof.display_name(), "end of file");
    }
}
