//! Diagnostic system for error reporting.
//!
//! Every phase of the interpreter reports problems as [`Diagnostic`] values:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//!
//! The terminal emitter renders diagnostics in the interpreter's report
//! format, which downstream tooling matches on exactly:
//!
//! ```text
//! [row:col] Error at 'x': Expect expression.
//! [row:col] RuntimeError: Division by zero.
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
