//! Calls, construction, and method binding.
//!
//! A call frame is a fresh environment parented at the callee's
//! captured closure, never at the caller. Bodies run against the
//! callee's own [`Program`]; see the module doc on [`super`].

use std::rc::Rc;

use lox_ir::{ExprId, Name, Span};
use smallvec::SmallVec;
use tracing::trace;

use super::Interpreter;
use super::exec::Flow;
use crate::Program;
use crate::environment::EnvRef;
use crate::error::{self, EvalError, EvalResult};
use crate::value::{InstanceRef, LoxFunction, Value};

/// Argument buffer; almost every call fits inline.
pub(crate) type Args = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    /// Call any value, or report that it isn't callable.
    pub(crate) fn call_value(&mut self, callee: Value, args: Args, span: Span) -> EvalResult {
        match callee {
            Value::Function(function) => {
                check_arity(function.arity(), args.len(), span)?;
                self.call_function(&function, args)
            }
            Value::Native(native) => {
                check_arity(native.arity, args.len(), span)?;
                Ok((native.function)(&args))
            }
            Value::Class(class) => {
                check_arity(class.arity(self.names.init), args.len(), span)?;
                let instance = InstanceRef::new(class.clone());
                if let Some(initializer) = class.find_method(self.names.init) {
                    let bound = initializer.bind(&instance, self.names.this);
                    self.call_function(&bound, args)?;
                }
                Ok(Value::Instance(instance))
            }
            Value::Nil | Value::Bool(_) | Value::Number(_) | Value::Str(_) | Value::Instance(_) => {
                Err(error::not_callable(span))
            }
        }
    }

    /// Run a function body in a fresh frame and catch its `return`.
    pub(crate) fn call_function(&mut self, function: &Rc<LoxFunction>, args: Args) -> EvalResult {
        // Execute against the callee's program; its node ids mean
        // nothing in the caller's arena.
        let program = function.program().clone();
        let ast = program.ast();
        let decl = ast.function(function.declaration());
        trace!(params = decl.arity(), "call_function");

        let frame = EnvRef::with_parent(function.closure());
        for (&param, arg) in decl.params.iter().zip(args) {
            frame.define(param, arg);
        }

        let flow = self.execute_block(&program, ast.stmt_list(decl.body), &frame)?;

        if function.is_initializer() {
            // `init` always hands back the instance, even through a
            // bare `return;`. The bound closure holds `this` at hop 0.
            return Ok(function
                .closure()
                .get_at(0, self.names.this)
                .unwrap_or(Value::Nil));
        }
        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }

    /// Read a property off an instance: fields shadow methods, and
    /// methods bind fresh to the instance on every access.
    pub(crate) fn get_property(
        &self,
        instance: &InstanceRef,
        name: Name,
        span: Span,
    ) -> EvalResult {
        if let Some(value) = instance.field(name) {
            return Ok(value);
        }
        if let Some(method) = instance.class().find_method(name) {
            return Ok(Value::Function(method.bind(instance, self.names.this)));
        }
        Err(error::undefined_property(self.interner.lookup(name), span))
    }

    /// Resolve `super.method`: look the method up starting at the
    /// stored superclass, then bind it to the current `this`.
    pub(crate) fn super_method(
        &self,
        program: &Program,
        id: ExprId,
        method: Name,
        method_span: Span,
        env: &EnvRef,
    ) -> EvalResult {
        // The resolver recorded the hop distance to the scope binding
        // `super`; `this` lives one scope nearer.
        let missing = || error::undefined_property(self.interner.lookup(method), method_span);
        let Some(hops) = program.resolutions().hops(id) else {
            return Err(missing());
        };
        let Some(Value::Class(superclass)) = env.get_at(hops, self.names.super_) else {
            return Err(missing());
        };
        let Some(Value::Instance(instance)) = env.get_at(hops - 1, self.names.this) else {
            return Err(missing());
        };

        match superclass.find_method(method) {
            Some(found) => Ok(Value::Function(found.bind(&instance, self.names.this))),
            None => Err(missing()),
        }
    }
}

fn check_arity(expected: usize, got: usize, span: Span) -> Result<(), EvalError> {
    if expected == got {
        Ok(())
    } else {
        Err(error::arity_mismatch(expected, got, span))
    }
}
