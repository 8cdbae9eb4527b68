//! Interactive session.
//!
//! Reads one line at a time, runs it through the full pipeline, and keeps
//! the interpreter alive so definitions from earlier lines stay in scope.
//! A line that fails is reported and leaves no mark on the next one.

use std::io::{BufRead, Write};

use lox_diagnostic::emitter::ColorMode;
use lox_eval::{Interpreter, SharedPrintHandler};
use lox_ir::StringInterner;

use crate::pipeline::run_source;

/// Run a read-eval-print loop over `input` until end of input.
///
/// The prompt goes to stdout so it lines up with program output in a
/// terminal; diagnostics go to `errors`.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    mut errors: W,
    print_handler: SharedPrintHandler,
    mode: ColorMode,
    is_tty: bool,
) {
    let interner = StringInterner::new();
    let mut interpreter = Interpreter::new(&interner, print_handler);

    let mut line = String::new();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                // The status only matters for batch exit codes; the
                // session continues either way.
                run_source(&interner, &mut interpreter, &line, &mut errors, mode, is_tty);
            }
            Err(error) => {
                let _ = writeln!(errors, "error reading input: {error}");
                break;
            }
        }
    }
}
