//! Lox interpreter driver.
//!
//! Ties the pipeline crates together and fronts them with a small CLI:
//!
//! ```text
//! source ──lex──► TokenList ──parse──► Ast ──resolve──► Resolutions ──eval──► output
//! ```
//!
//! Every stage reports through `lox_diagnostic`'s one-line terminal
//! format. The library half ([`run_source`], [`run_file`], [`run_repl`])
//! is what the integration tests drive; `main` only parses arguments and
//! picks a mode.

pub mod pipeline;
pub mod repl;

pub use pipeline::{EX_DATAERR, EX_SOFTWARE, EX_USAGE, RunStatus, run_file, run_source};
pub use repl::run_repl;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call once at startup; safe to call again. Enable with
/// `RUST_LOG=lox_eval=trace` or similar. Without `RUST_LOG` no subscriber
/// is installed, and spans go to stderr so they never mix with program
/// output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
