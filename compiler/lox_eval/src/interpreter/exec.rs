//! Statement execution.
//!
//! Statements evaluate to a [`Flow`] inside an ordinary `Result`, so a
//! `return` travels up through enclosing blocks and loops as a value
//! until a call boundary catches it. Runtime errors travel the `Err`
//! track and abort the whole program.

use std::rc::Rc;

use lox_ir::{ExprId, FunctionRange, Name, StmtId, StmtKind};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::Interpreter;
use crate::Program;
use crate::environment::EnvRef;
use crate::error::{self, EvalError};
use crate::value::{LoxClass, LoxFunction, Value};

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Fell off the end; execution continues with the next statement.
    Normal,
    /// A `return` unwinding toward the nearest call boundary.
    Return(Value),
}

impl Interpreter<'_> {
    /// Execute one statement.
    ///
    /// Grows the stack when needed: statements recurse through blocks,
    /// loops, and the expressions inside them.
    pub(crate) fn execute(
        &mut self,
        program: &Program,
        id: StmtId,
        env: &EnvRef,
    ) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| self.execute_inner(program, id, env))
    }

    fn execute_inner(
        &mut self,
        program: &Program,
        id: StmtId,
        env: &EnvRef,
    ) -> Result<Flow, EvalError> {
        let ast = program.ast();
        match ast.stmt(id).kind {
            StmtKind::Expression(expr) => {
                self.evaluate(program, expr, env)?;
                Ok(Flow::Normal)
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(program, expr, env)?;
                let line = self.stringify(&value);
                self.print_handler.println(&line);
                Ok(Flow::Normal)
            }
            StmtKind::Var { name, init, .. } => {
                let value = if init.is_valid() {
                    self.evaluate(program, init, env)?
                } else {
                    Value::Nil
                };
                env.define(name, value);
                Ok(Flow::Normal)
            }
            StmtKind::Block(range) => {
                let scope = EnvRef::with_parent(env);
                self.execute_block(program, ast.stmt_list(range), &scope)
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(program, cond, env)?.is_truthy() {
                    self.execute(program, then_branch, env)
                } else if else_branch.is_valid() {
                    self.execute(program, else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtKind::While { cond, body } => {
                while self.evaluate(program, cond, env)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(program, body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::Function(function) => {
                let declared = LoxFunction::new(program, function, env, false);
                env.define(ast.function(function).name, Value::Function(Rc::new(declared)));
                Ok(Flow::Normal)
            }
            StmtKind::Return { value, .. } => {
                let result = if value.is_valid() {
                    self.evaluate(program, value, env)?
                } else {
                    Value::Nil
                };
                Ok(Flow::Return(result))
            }
            StmtKind::Class {
                name,
                superclass,
                methods,
                ..
            } => self.execute_class(program, name, superclass, methods, env),
        }
    }

    /// Run statements in order, short-circuiting when one returns.
    pub(crate) fn execute_block(
        &mut self,
        program: &Program,
        stmts: &[StmtId],
        env: &EnvRef,
    ) -> Result<Flow, EvalError> {
        for &stmt in stmts {
            if let Flow::Return(value) = self.execute(program, stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_class(
        &mut self,
        program: &Program,
        name: Name,
        superclass: ExprId,
        methods: FunctionRange,
        env: &EnvRef,
    ) -> Result<Flow, EvalError> {
        let ast = program.ast();
        trace!(methods = ast.function_list(methods).len(), "execute_class");

        let superclass_value = if superclass.is_valid() {
            let value = self.evaluate(program, superclass, env)?;
            let Value::Class(class) = value else {
                return Err(error::superclass_not_class(ast.expr(superclass).span));
            };
            Some(class)
        } else {
            None
        };

        // Bound before the methods are built so they can close over the
        // class name; overwritten with the finished class below.
        env.define(name, Value::Nil);

        // Methods of a subclass close over an extra scope binding
        // `super`, mirroring the scope the resolver counted.
        let method_env = match &superclass_value {
            Some(class) => {
                let scope = EnvRef::with_parent(env);
                scope.define(self.names.super_, Value::Class(class.clone()));
                scope
            }
            None => env.clone(),
        };

        let mut table = FxHashMap::default();
        for &method in ast.function_list(methods) {
            let decl = ast.function(method);
            let is_initializer = decl.name == self.names.init;
            let function = LoxFunction::new(program, method, &method_env, is_initializer);
            table.insert(decl.name, Rc::new(function));
        }

        let class = LoxClass::new(name, superclass_value, table);
        env.define(name, Value::Class(Rc::new(class)));
        Ok(Flow::Normal)
    }
}
