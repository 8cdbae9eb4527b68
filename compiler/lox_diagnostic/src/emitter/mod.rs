//! Diagnostic Emitters
//!
//! Renders diagnostics for human consumption. The terminal emitter produces
//! the interpreter's report format, one line per diagnostic:
//!
//! ```text
//! [row:col] Error <context>: <message>
//! [row:col] RuntimeError: <message>
//! ```
//!
//! Each emitter implements the [`DiagnosticEmitter`] trait.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);
}
