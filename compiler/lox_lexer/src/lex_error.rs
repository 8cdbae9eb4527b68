//! Scanner error types.
//!
//! Scanner errors are accumulated rather than raised: the scanner records
//! each one and keeps going, so a single run can report every lexical
//! problem in the source.

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::Span;

/// A scanner error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// Where the error occurred.
    pub span: Span,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of scanner error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character no lexical rule recognizes.
    UnexpectedCharacter { found: char },
    /// Missing closing `"` for a string literal.
    UnterminatedString,
    /// Missing closing `*/` for a block comment.
    UnterminatedBlockComment,
}

impl LexError {
    /// Create an unexpected character error.
    #[cold]
    pub fn unexpected_character(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnexpectedCharacter { found },
        }
    }

    /// Create an unterminated string error.
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
        }
    }

    /// Create an unterminated block comment error.
    #[cold]
    pub fn unterminated_block_comment(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedBlockComment,
        }
    }

    /// The report message for this error.
    pub fn message(&self) -> String {
        match self.kind {
            LexErrorKind::UnexpectedCharacter { found } => {
                format!("Unexpected character '{found}'.")
            }
            LexErrorKind::UnterminatedString => "Unterminated string.".to_string(),
            LexErrorKind::UnterminatedBlockComment => "Unterminated block comment.".to_string(),
        }
    }

    /// Convert to a diagnostic for emission.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self.kind {
            LexErrorKind::UnexpectedCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnterminatedBlockComment => ErrorCode::E0003,
        };
        Diagnostic::error(code)
            .with_message(self.message())
            .with_label(self.span, "here")
    }
}
