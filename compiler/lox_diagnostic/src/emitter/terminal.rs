//! Terminal Emitter
//!
//! Renders diagnostics in the interpreter's report format with optional
//! ANSI color support. One line per diagnostic:
//!
//! ```text
//! [row:col] Error at 'x': <message>    static error at a token
//! [row:col] Error at end: <message>    static error at end of input
//! [row:col] Error : <message>          scanner error (no token context)
//! [row:col] RuntimeError: <message>    runtime error
//! ```
//!
//! The emitter is built over the source text the diagnostics' spans index,
//! so it can compute `[row:col]` positions and slice the offending lexeme.

use std::io::{self, Write};

use lox_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, ErrorCode};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Holds the source text so spans can be mapped to `[row:col]` positions
/// and lexemes. Diagnostics emitted through it must carry spans into that
/// same source.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    source: &'src str,
    lines: LineOffsetTable,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create a new terminal emitter over `source`.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `source` - The source text the diagnostics' spans index
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, source: &'src str, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            source,
            lines: LineOffsetTable::build(source),
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Write the severity word ("Error" or "RuntimeError") with color.
    fn write_severity(&mut self, word: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}{word}{}", colors::ERROR, colors::RESET);
        } else {
            let _ = write!(self.writer, "{word}");
        }
    }

    /// Token context for a static error: `at end`, `at '<lexeme>'`, or
    /// empty for scanner errors (which have no token to point at).
    fn context_for(&self, code: ErrorCode, span: Span) -> String {
        if code.is_scan_error() {
            return String::new();
        }
        if span.start as usize >= self.source.len() {
            return "at end".to_string();
        }
        let end = (span.end as usize).min(self.source.len());
        format!("at '{}'", &self.source[span.start as usize..end])
    }
}

impl<'src> TerminalEmitter<'src, io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(source: &'src str, mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), source, mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Unlabeled diagnostics point at end of input.
        let span = diagnostic
            .primary_span()
            .unwrap_or(Span::point(self.source.len() as u32));
        let (row, col) = self.lines.offset_to_line_col(self.source, span.start);

        let _ = write!(self.writer, "[{row}:{col}] ");
        if diagnostic.code.is_runtime_error() {
            self.write_severity("RuntimeError");
            let _ = writeln!(self.writer, ": {}", diagnostic.message);
        } else {
            self.write_severity("Error");
            let context = self.context_for(diagnostic.code, span);
            let _ = writeln!(self.writer, " {context}: {}", diagnostic.message);
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(source: &str, diagnostic: &Diagnostic) -> String {
        let mut output = Vec::new();
        let mut emitter =
            TerminalEmitter::with_color_mode(&mut output, source, ColorMode::Never, false);
        emitter.emit(diagnostic);
        emitter.flush();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_error_shows_lexeme_context() {
        let source = "var = 1;";
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("Expect variable name.")
            .with_label(Span::new(4, 5), "here");

        assert_eq!(render(source, &diag), "[1:5] Error at '=': Expect variable name.\n");
    }

    #[test]
    fn error_at_end_of_input() {
        let source = "1 +";
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("Expect expression.")
            .with_label(Span::point(3), "here");

        assert_eq!(render(source, &diag), "[1:4] Error at end: Expect expression.\n");
    }

    #[test]
    fn scan_error_has_empty_context() {
        let source = "@";
        let diag = Diagnostic::error(ErrorCode::E0002)
            .with_message("Unexpected character '@'.")
            .with_label(Span::new(0, 1), "here");

        assert_eq!(render(source, &diag), "[1:1] Error : Unexpected character '@'.\n");
    }

    #[test]
    fn runtime_error_format() {
        let source = "1 / 0;";
        let diag = Diagnostic::error(ErrorCode::E6001)
            .with_message("Division by zero.")
            .with_label(Span::new(2, 3), "here");

        assert_eq!(render(source, &diag), "[1:3] RuntimeError: Division by zero.\n");
    }

    #[test]
    fn row_counts_from_one_per_line() {
        let source = "var a;\nb();";
        let diag = Diagnostic::error(ErrorCode::E6020)
            .with_message("Undefined variable 'b'.")
            .with_label(Span::new(7, 8), "here");

        assert_eq!(
            render(source, &diag),
            "[2:1] RuntimeError: Undefined variable 'b'.\n"
        );
    }

    #[test]
    fn emit_all_renders_each_on_its_own_line() {
        let source = "@ #";
        let diags = vec![
            Diagnostic::error(ErrorCode::E0002)
                .with_message("Unexpected character '@'.")
                .with_label(Span::new(0, 1), "here"),
            Diagnostic::error(ErrorCode::E0002)
                .with_message("Unexpected character '#'.")
                .with_label(Span::new(2, 3), "here"),
        ];

        let mut output = Vec::new();
        let mut emitter =
            TerminalEmitter::with_color_mode(&mut output, source, ColorMode::Never, false);
        emitter.emit_all(&diags);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "[1:1] Error : Unexpected character '@'.\n[1:3] Error : Unexpected character '#'.\n"
        );
    }

    #[test]
    fn always_mode_colors_severity_word() {
        let source = "1 / 0;";
        let diag = Diagnostic::error(ErrorCode::E6001)
            .with_message("Division by zero.")
            .with_label(Span::new(2, 3), "here");

        let mut output = Vec::new();
        let mut emitter =
            TerminalEmitter::with_color_mode(&mut output, source, ColorMode::Always, false);
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\x1b[1;31mRuntimeError\x1b[0m"));
    }

    #[test]
    fn auto_mode_without_tty_is_plain() {
        let source = "@";
        let diag = Diagnostic::error(ErrorCode::E0002)
            .with_message("Unexpected character '@'.")
            .with_label(Span::new(0, 1), "here");

        let mut output = Vec::new();
        let mut emitter =
            TerminalEmitter::with_color_mode(&mut output, source, ColorMode::Auto, false);
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }

    #[test]
    fn unlabeled_diagnostic_points_at_end() {
        let source = "fun";
        let diag = Diagnostic::error(ErrorCode::E1001).with_message("Expect function name.");

        assert_eq!(
            render(source, &diag),
            "[1:4] Error at end: Expect function name.\n"
        );
    }
}
