//! Print handler for configurable output.
//!
//! `print` output can be directed to different destinations:
//! - batch and REPL runs: stdout
//! - tests: a buffer for assertions
//! - anything that only wants side effects checked: discarded
//!
//! Enum dispatch instead of trait objects keeps this frequently-used
//! path free of vtable indirection.

use std::cell::RefCell;
use std::rc::Rc;

/// Default print handler that writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    /// Print a line (with the trailing newline).
    pub fn println(&self, line: &str) {
        println!("{line}");
    }
}

/// Print handler that captures output to a buffer.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: RefCell<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: RefCell::new(String::new()),
        }
    }

    /// Print a line (with the trailing newline).
    pub fn println(&self, line: &str) {
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(line);
        buffer.push('\n');
    }

    /// Get all captured output.
    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandler {
    /// Writes to stdout (batch and REPL runs).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (tests).
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandler {
    /// Print a line (with the trailing newline).
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout(handler) => handler.println(line),
            Self::Buffer(handler) => handler.println(line),
            Self::Silent => {}
        }
    }

    /// Get all captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(handler) => handler.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output.
    pub fn clear(&self) {
        if let Self::Buffer(handler) = self {
            handler.clear();
        }
    }
}

/// Shared print handler that can be passed around. `Rc`, not `Arc`:
/// execution is single-threaded.
pub type SharedPrintHandler = Rc<PrintHandler>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Buffer(BufferPrintHandler::new()))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Silent)
}
