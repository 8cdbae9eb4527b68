//! Error recovery for the parser.
//!
//! Provides token sets and synchronization for continuing parsing after
//! errors. Uses bitset-based O(1) membership testing.

use lox_ir::TokenKind;

use crate::cursor::Cursor;

/// A set of token kinds using bitset representation for O(1) membership
/// testing.
///
/// Each bit in the u64 corresponds to a `TokenKind` discriminant index.
/// Lox has about forty token kinds, so 64 bits cover every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.discriminant_index()))
    }

    /// Check if this set contains a token kind.
    ///
    /// Membership depends only on the discriminant, so data-carrying
    /// variants match regardless of payload.
    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Count the number of token kinds in this set.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that begin a declaration or statement.
///
/// After a parse error, skipping to one of these (or just past a
/// semicolon) resynchronizes the parser at a statement boundary.
pub const DECL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Class)
    .with(TokenKind::Fun)
    .with(TokenKind::Var)
    .with(TokenKind::For)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Print)
    .with(TokenKind::Return);

/// Discard the offending token, then skip forward until just past a
/// semicolon or at a token in the recovery set.
///
/// Returns `true` if a boundary was found, `false` if EOF was reached.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> bool {
    if cursor.is_at_end() {
        return false;
    }
    cursor.advance();

    while !cursor.is_at_end() {
        if cursor.previous_tag() == TokenKind::TAG_SEMICOLON {
            return true;
        }
        if recovery.contains(cursor.current_kind()) {
            return true;
        }
        cursor.advance();
    }
    false
}

#[cfg(test)]
mod tests {
    use lox_ir::StringInterner;

    use super::*;

    fn make_cursor(source: &str) -> Cursor<'static> {
        let interner = StringInterner::new();
        let (tokens, _) = lox_lexer::lex(source, &interner);
        Cursor::new(Box::leak(Box::new(tokens)))
    }

    #[test]
    fn token_set_basics() {
        let set = TokenSet::new();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);

        let set = set.with(TokenKind::Var).with(TokenKind::Fun);
        assert_eq!(set.count(), 2);
        assert!(set.contains(TokenKind::Var));
        assert!(set.contains(TokenKind::Fun));
        assert!(!set.contains(TokenKind::Plus));
    }

    #[test]
    fn token_set_data_variants_match_by_discriminant() {
        let set = TokenSet::new().with(TokenKind::Number(0));
        assert!(set.contains(TokenKind::Number(f64::to_bits(99.0))));
        assert!(!set.contains(TokenKind::Ident(lox_ir::Name::EMPTY)));
    }

    #[test]
    fn decl_start_contains_statement_keywords() {
        assert!(DECL_START.contains(TokenKind::Class));
        assert!(DECL_START.contains(TokenKind::Var));
        assert!(DECL_START.contains(TokenKind::Return));
        assert!(!DECL_START.contains(TokenKind::Else));
        assert!(!DECL_START.contains(TokenKind::Semicolon));
    }

    #[test]
    fn synchronize_stops_after_semicolon() {
        let mut cursor = make_cursor("+ + 1; 2");

        let found = synchronize(&mut cursor, DECL_START);
        assert!(found);
        // Stopped just past the semicolon, at the start of `2`.
        assert!(matches!(cursor.current_kind(), TokenKind::Number(_)));
    }

    #[test]
    fn synchronize_stops_at_declaration_keyword() {
        let mut cursor = make_cursor("+ 1 2 var x");

        let found = synchronize(&mut cursor, DECL_START);
        assert!(found);
        assert!(cursor.check(TokenKind::Var));
    }

    #[test]
    fn synchronize_reaches_eof_without_boundary() {
        let mut cursor = make_cursor("+ 1 2");

        let found = synchronize(&mut cursor, DECL_START);
        assert!(!found);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn synchronize_at_eof_is_a_no_op() {
        let mut cursor = make_cursor("");

        assert!(!synchronize(&mut cursor, DECL_START));
        assert!(cursor.is_at_end());
    }
}
