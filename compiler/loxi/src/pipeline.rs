//! The source-to-execution pipeline.
//!
//! Stages run in order: scan, parse, resolve, evaluate. Execution starts
//! only when every static stage came back clean, so runtime state never
//! observes a half-built program. Each stage's errors render through
//! [`TerminalEmitter`] in the interpreter's one-line report format.

use std::io::Write;

use lox_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use lox_eval::{Interpreter, Program};
use lox_ir::StringInterner;
use tracing::debug;

/// Usage or I/O problem, before any source ran.
pub const EX_USAGE: i32 = 64;
/// The program failed a static check; nothing was executed.
pub const EX_DATAERR: i32 = 65;
/// Execution started and aborted on a runtime error.
pub const EX_SOFTWARE: i32 = 70;

/// Outcome of running one source string through the pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunStatus {
    /// Ran to completion.
    Ok,
    /// Lexical, syntax, or resolution errors; execution was skipped.
    StaticError,
    /// A runtime error aborted execution.
    RuntimeError,
}

impl RunStatus {
    /// Process exit code for batch mode, following the BSD sysexits
    /// convention.
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Ok => 0,
            RunStatus::StaticError => EX_DATAERR,
            RunStatus::RuntimeError => EX_SOFTWARE,
        }
    }
}

/// Run one source string through scan, parse, resolve, and evaluate.
///
/// Diagnostics render to `errors` as they are found. The interner must be
/// the one `interpreter` was built over. The interpreter's globals keep
/// whatever the program defines, so feeding successive sources to the same
/// interpreter gives session semantics.
pub fn run_source<W: Write>(
    interner: &StringInterner,
    interpreter: &mut Interpreter<'_>,
    source: &str,
    errors: W,
    mode: ColorMode,
    is_tty: bool,
) -> RunStatus {
    let mut emitter = TerminalEmitter::with_color_mode(errors, source, mode, is_tty);

    let (tokens, lex_errors) = lox_lexer::lex(source, interner);
    for error in &lex_errors {
        emitter.emit(&error.to_diagnostic());
    }

    // The parser still runs over a token list with scan errors in it, so
    // one pass reports both kinds.
    let parsed = lox_parse::parse(&tokens);
    for error in &parsed.errors {
        emitter.emit(&error.to_diagnostic());
    }
    if !lex_errors.is_empty() || parsed.has_errors() {
        emitter.flush();
        return RunStatus::StaticError;
    }

    // The resolver assumes a complete program; it never sees recovery stubs.
    let resolved = lox_resolve::resolve(&parsed.ast, &parsed.roots, interner);
    if resolved.has_errors() {
        for error in &resolved.errors {
            emitter.emit(&error.to_diagnostic());
        }
        emitter.flush();
        return RunStatus::StaticError;
    }

    let program = Program::new(parsed.ast, resolved.resolutions);
    match interpreter.interpret(&program, &parsed.roots) {
        Ok(()) => RunStatus::Ok,
        Err(error) => {
            emitter.emit(&error.to_diagnostic());
            emitter.flush();
            RunStatus::RuntimeError
        }
    }
}

/// Run a script file, returning the process exit code.
///
/// Program output goes to stdout, diagnostics to stderr. A file that
/// cannot be read is a usage-class failure, not a program failure.
pub fn run_file(path: &str) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            let message = match error.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {error}"),
            };
            eprintln!("{message}");
            return EX_USAGE;
        }
    };
    debug!(path, bytes = source.len(), "run script");

    let interner = StringInterner::new();
    let mut interpreter = Interpreter::new(&interner, lox_eval::stdout_handler());
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    run_source(
        &interner,
        &mut interpreter,
        &source,
        std::io::stderr(),
        ColorMode::Auto,
        is_tty,
    )
    .exit_code()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::RunStatus;

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(RunStatus::Ok.exit_code(), 0);
        assert_eq!(RunStatus::StaticError.exit_code(), 65);
        assert_eq!(RunStatus::RuntimeError.exit_code(), 70);
    }
}
