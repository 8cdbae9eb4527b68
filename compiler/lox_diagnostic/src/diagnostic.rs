//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`] and [`Label`], the building blocks every phase
//! uses to report errors. A diagnostic carries the error code, the main
//! message, and one or more labeled spans; the emitter decides how it is
//! rendered.

use std::fmt;

use lox_ir::Span;

use crate::ErrorCode;

/// A labeled span with a message.
///
/// Labels attach source locations to a diagnostic. The primary label is
/// the error location itself; secondary labels point at related context,
/// such as the earlier declaration in a redeclaration error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    /// The source location to highlight.
    pub span: Span,
    /// The label text explaining this location.
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with all context needed to render an error report.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builder_collects_labels() {
        let diag = Diagnostic::error(ErrorCode::E2002)
            .with_message("Already a variable with this name in this scope.")
            .with_label(Span::new(20, 21), "redeclared here")
            .with_secondary_label(Span::new(4, 5), "first declared here");

        assert_eq!(diag.labels.len(), 2);
        assert!(diag.labels[0].is_primary);
        assert!(!diag.labels[1].is_primary);
    }

    #[test]
    fn primary_span_skips_secondary_labels() {
        let diag = Diagnostic::error(ErrorCode::E2002)
            .with_secondary_label(Span::new(0, 1), "context")
            .with_label(Span::new(10, 11), "here");

        assert_eq!(diag.primary_span().unwrap(), Span::new(10, 11));
    }

    #[test]
    fn primary_span_empty_when_unlabeled() {
        let diag = Diagnostic::error(ErrorCode::E1002).with_message("Expect expression.");
        assert_eq!(diag.primary_span(), None);
    }

    #[test]
    fn display_includes_code_and_labels() {
        let diag = Diagnostic::error(ErrorCode::E6020)
            .with_message("Undefined variable 'x'.")
            .with_label(Span::new(0, 1), "not found");

        let text = diag.to_string();
        assert!(text.contains("E6020"));
        assert!(text.contains("Undefined variable 'x'."));
        assert!(text.contains("-->"));
    }
}
