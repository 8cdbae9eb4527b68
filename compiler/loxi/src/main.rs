//! Lox interpreter CLI.
//!
//! `lox` with no arguments opens an interactive session; `lox <script>`
//! runs a file and exits with the sysexits code for what went wrong.

use std::io::IsTerminal;

use lox_diagnostic::emitter::ColorMode;

fn main() {
    loxi::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => {
            let is_tty = std::io::stderr().is_terminal();
            loxi::run_repl(
                std::io::stdin().lock(),
                std::io::stderr(),
                lox_eval::stdout_handler(),
                ColorMode::Auto,
                is_tty,
            );
        }
        2 => std::process::exit(loxi::run_file(&args[1])),
        _ => {
            eprintln!("Usage: lox [script]");
            std::process::exit(loxi::EX_USAGE);
        }
    }
}
