//! Tree-walking interpreter for Lox.
//!
//! # Architecture
//!
//! - [`Environment`]: lexically chained scopes behind shared [`EnvRef`]
//!   handles; closures keep their defining chain alive
//! - [`Interpreter`]: the long-lived execution context owning the globals,
//!   the interner handle, and the print handler; it survives across
//!   programs so a REPL session accumulates state
//! - [`Value`]: runtime values, with functions, classes, and instances
//!   shared through `Rc`
//! - [`Program`]: one executed tree bundled with its resolution table
//!
//! Statements execute to a [`Flow`] inside an ordinary `Result`, so
//! `return` unwinds by result propagation rather than a panic or
//! exception mechanism. Expressions evaluate to [`Value`]s. A runtime
//! error aborts execution at the first failure.
//!
//! # Program lifetimes
//!
//! A function value carries the [`Program`] it was declared in. Node ids
//! are only meaningful against their own arena, and in a REPL a function
//! defined on one line is routinely called from a later line whose arena
//! is a different allocation. Calls therefore execute the callee's
//! program, not the caller's.

mod environment;
mod error;
mod interpreter;
mod print_handler;
mod value;

pub use environment::{EnvRef, Environment};
pub use error::{EvalError, EvalResult};
pub use interpreter::{Flow, Interpreter};
pub use print_handler::{
    BufferPrintHandler, PrintHandler, SharedPrintHandler, StdoutPrintHandler, buffer_handler,
    silent_handler, stdout_handler,
};
pub use value::{InstanceRef, LoxClass, LoxFunction, NativeFunction, Value};

use std::rc::Rc;

use lox_ir::Ast;
use lox_resolve::Resolutions;

/// One executable program: a parse tree plus its resolution table.
///
/// Cheap to clone; function values clone it so their bodies and hop
/// table stay alive after the session moves on to later programs.
#[derive(Clone, Debug)]
pub struct Program {
    ast: Rc<Ast>,
    resolutions: Rc<Resolutions>,
}

impl Program {
    /// Bundle a resolved tree for execution.
    pub fn new(ast: Ast, resolutions: Resolutions) -> Self {
        Program {
            ast: Rc::new(ast),
            resolutions: Rc::new(resolutions),
        }
    }

    #[inline]
    pub(crate) fn ast(&self) -> &Ast {
        &self.ast
    }

    #[inline]
    pub(crate) fn resolutions(&self) -> &Resolutions {
        &self.resolutions
    }
}
