//! Expression evaluation.
//!
//! Operands evaluate left to right, and every operand is evaluated
//! before its operator applies, except for `and`/`or`, which decide
//! from the left value alone whether the right side runs at all.

use lox_ir::{BinaryOp, ExprId, ExprKind, LiteralValue, LogicalOp, Name, Span, UnaryOp};
use lox_stack::ensure_sufficient_stack;

use super::Interpreter;
use super::call::Args;
use crate::Program;
use crate::environment::EnvRef;
use crate::error::{self, EvalError, EvalResult};
use crate::value::Value;

impl Interpreter<'_> {
    /// Evaluate one expression.
    ///
    /// Grows the stack when needed; nested expressions recurse here.
    pub(crate) fn evaluate(&mut self, program: &Program, id: ExprId, env: &EnvRef) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(program, id, env))
    }

    fn evaluate_inner(&mut self, program: &Program, id: ExprId, env: &EnvRef) -> EvalResult {
        let ast = program.ast();
        let expr = ast.expr(id);
        match expr.kind {
            ExprKind::Literal(literal) => Ok(self.literal_value(literal)),
            ExprKind::Grouping(inner) => self.evaluate(program, inner, env),
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(program, operand, env)?;
                // The node's span starts at the operator token, which is
                // where operand type errors point.
                apply_unary(op, &value, expr.span)
            }
            ExprKind::Binary {
                op,
                op_span,
                left,
                right,
            } => {
                let lhs = self.evaluate(program, left, env)?;
                let rhs = self.evaluate(program, right, env)?;
                apply_binary(op, &lhs, &rhs, op_span)
            }
            ExprKind::Logical { op, left, right } => {
                let lhs = self.evaluate(program, left, env)?;
                let short_circuits = match op {
                    LogicalOp::Or => lhs.is_truthy(),
                    LogicalOp::And => !lhs.is_truthy(),
                };
                if short_circuits {
                    Ok(lhs)
                } else {
                    self.evaluate(program, right, env)
                }
            }
            ExprKind::Variable(name) => self.lookup_variable(program, id, name, expr.span, env),
            ExprKind::Assign { name, value } => {
                let value = self.evaluate(program, value, env)?;
                self.assign_variable(program, id, name, value.clone(), expr.span, env)?;
                Ok(value)
            }
            ExprKind::Call { callee, args } => {
                let callee_value = self.evaluate(program, callee, env)?;
                let mut arguments = Args::new();
                for &arg in ast.expr_list(args) {
                    arguments.push(self.evaluate(program, arg, env)?);
                }
                // The node's span ends at the closing paren, where call
                // errors point.
                let paren = Span::point(expr.span.end - 1);
                self.call_value(callee_value, arguments, paren)
            }
            ExprKind::Get {
                object,
                name,
                name_span,
            } => {
                let object = self.evaluate(program, object, env)?;
                let Value::Instance(instance) = object else {
                    return Err(error::property_on_non_instance(name_span));
                };
                self.get_property(&instance, name, name_span)
            }
            ExprKind::Set {
                object,
                name,
                name_span,
                value,
            } => {
                let object = self.evaluate(program, object, env)?;
                let Value::Instance(instance) = object else {
                    return Err(error::field_on_non_instance(name_span));
                };
                let value = self.evaluate(program, value, env)?;
                instance.set_field(name, value.clone());
                Ok(value)
            }
            ExprKind::This => self.lookup_variable(program, id, self.names.this, expr.span, env),
            ExprKind::Super {
                method,
                method_span,
            } => self.super_method(program, id, method, method_span, env),
        }
    }

    fn literal_value(&self, literal: LiteralValue) -> Value {
        match literal {
            LiteralValue::Nil => Value::Nil,
            LiteralValue::Bool(value) => Value::Bool(value),
            LiteralValue::Number(bits) => Value::Number(f64::from_bits(bits)),
            LiteralValue::Str(name) => Value::Str(self.interner.lookup(name).into()),
        }
    }

    /// Read a variable: at the resolved hop distance for locals, from
    /// the globals for everything the resolver left alone.
    fn lookup_variable(
        &self,
        program: &Program,
        id: ExprId,
        name: Name,
        span: Span,
        env: &EnvRef,
    ) -> EvalResult {
        let value = match program.resolutions().hops(id) {
            Some(hops) => env.get_at(hops, name),
            None => self.globals.get(name),
        };
        value.ok_or_else(|| error::undefined_variable(self.interner.lookup(name), span))
    }

    /// Assign a variable, mirroring [`Self::lookup_variable`].
    fn assign_variable(
        &mut self,
        program: &Program,
        id: ExprId,
        name: Name,
        value: Value,
        span: Span,
        env: &EnvRef,
    ) -> Result<(), EvalError> {
        let assigned = match program.resolutions().hops(id) {
            Some(hops) => env.assign_at(hops, name, value),
            None => self.globals.assign(name, value),
        };
        if assigned {
            Ok(())
        } else {
            Err(error::undefined_variable(self.interner.lookup(name), span))
        }
    }
}

fn apply_unary(op: UnaryOp, value: &Value, span: Span) -> EvalResult {
    match op {
        UnaryOp::Neg => match value.as_number() {
            Some(number) => Ok(Value::Number(-number)),
            None => Err(error::operand_not_number(span)),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}

fn apply_binary(op: BinaryOp, lhs: &Value, rhs: &Value, span: Span) -> EvalResult {
    match op {
        BinaryOp::Add => add_values(lhs, rhs, span),
        BinaryOp::Sub => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Number(a - b))
        }
        BinaryOp::Mul => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Number(a * b))
        }
        BinaryOp::Div => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            divide(a, b, span)
        }
        BinaryOp::Lt => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Bool(a < b))
        }
        BinaryOp::LtEq => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Bool(a <= b))
        }
        BinaryOp::Gt => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Bool(a > b))
        }
        BinaryOp::GtEq => {
            let (a, b) = number_operands(lhs, rhs, span)?;
            Ok(Value::Bool(a >= b))
        }
        BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::NotEq => Ok(Value::Bool(lhs != rhs)),
    }
}

/// `+` is the one overloaded operator: number addition or string
/// concatenation, never a mix.
fn add_values(lhs: &Value, rhs: &Value, span: Span) -> EvalResult {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(joined.into()))
        }
        _ => Err(error::addition_type_mismatch(span)),
    }
}

fn divide(a: f64, b: f64, span: Span) -> EvalResult {
    // Catches -0.0 too; IEEE compares both zeroes equal.
    if b == 0.0 {
        return Err(error::division_by_zero(span));
    }
    Ok(Value::Number(a / b))
}

fn number_operands(lhs: &Value, rhs: &Value, span: Span) -> Result<(f64, f64), EvalError> {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(error::operands_not_numbers(span)),
    }
}
