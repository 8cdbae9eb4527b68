//! The interpreter: a long-lived execution context.
//!
//! One [`Interpreter`] spans a whole session. Batch runs give it one
//! program; a REPL gives it many in sequence, and globals defined by
//! earlier programs stay visible to later ones.
//!
//! # Program threading
//!
//! Execution methods take the [`Program`] as a parameter instead of
//! storing it, because the current program changes at call boundaries:
//! a function value is always executed against the program it was
//! declared in, which in a REPL is routinely not the one being run.

mod call;
mod exec;
mod expr;
mod format;

#[cfg(test)]
mod tests;

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use lox_ir::{Name, StmtId, StringInterner};
use tracing::debug;

use crate::Program;
use crate::environment::EnvRef;
use crate::error::EvalError;
use crate::print_handler::SharedPrintHandler;
use crate::value::{NativeFunction, Value};

pub use exec::Flow;

/// Pre-interned names the runtime keeps testing values against.
///
/// Interned once at construction so method binding and initializer
/// detection compare `Name`s instead of looking strings up.
#[derive(Clone, Copy)]
struct KeywordNames {
    this: Name,
    super_: Name,
    init: Name,
}

impl KeywordNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            this: interner.intern("this"),
            super_: interner.intern("super"),
            init: interner.intern("init"),
        }
    }
}

/// Tree-walking interpreter for Lox programs.
pub struct Interpreter<'i> {
    interner: &'i StringInterner,
    globals: EnvRef,
    print_handler: SharedPrintHandler,
    names: KeywordNames,
}

impl<'i> Interpreter<'i> {
    /// Create an interpreter with the built-ins installed in its
    /// globals.
    pub fn new(interner: &'i StringInterner, print_handler: SharedPrintHandler) -> Self {
        let globals = EnvRef::new();
        globals.define(
            interner.intern("clock"),
            Value::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                function: clock,
            })),
        );

        Interpreter {
            interner,
            globals,
            print_handler,
            names: KeywordNames::new(interner),
        }
    }

    /// Execute a program's top-level statements in order, stopping at
    /// the first runtime error.
    pub fn interpret(&mut self, program: &Program, roots: &[StmtId]) -> Result<(), EvalError> {
        debug!(roots = roots.len(), "interpret");
        let globals = self.globals.clone();
        for &stmt in roots {
            self.execute(program, stmt, &globals)?;
        }
        Ok(())
    }
}

/// `clock()`: seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Value {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |elapsed| elapsed.as_secs_f64());
    Value::Number(seconds)
}
