//! Runtime errors and their constructors.
//!
//! Every failure the interpreter can hit has one factory here, so the
//! message text and code live in exactly one place. The factories are
//! `#[cold]`: evaluation hot paths call them only on the failing edge.

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::Span;

use crate::value::Value;

/// A runtime error: the code, the user-facing message, and where.
///
/// Execution stops at the first one; runtime errors never accumulate.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EvalError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl EvalError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        EvalError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

/// Result alias for expression evaluation.
pub type EvalResult = Result<Value, EvalError>;

#[cold]
pub(crate) fn division_by_zero(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6001, "Division by zero.", span)
}

#[cold]
pub(crate) fn operand_not_number(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6010, "Operand must be a number.", span)
}

#[cold]
pub(crate) fn operands_not_numbers(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6011, "Operands must be numbers.", span)
}

#[cold]
pub(crate) fn addition_type_mismatch(span: Span) -> EvalError {
    EvalError::new(
        ErrorCode::E6012,
        "Operands must be two numbers or two strings.",
        span,
    )
}

#[cold]
pub(crate) fn undefined_variable(name: &str, span: Span) -> EvalError {
    EvalError::new(
        ErrorCode::E6020,
        format!("Undefined variable '{name}'."),
        span,
    )
}

#[cold]
pub(crate) fn undefined_property(name: &str, span: Span) -> EvalError {
    EvalError::new(
        ErrorCode::E6021,
        format!("Undefined property '{name}'."),
        span,
    )
}

#[cold]
pub(crate) fn property_on_non_instance(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6022, "Only instances have properties.", span)
}

#[cold]
pub(crate) fn field_on_non_instance(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6023, "Only instances have fields.", span)
}

#[cold]
pub(crate) fn arity_mismatch(expected: usize, got: usize, span: Span) -> EvalError {
    EvalError::new(
        ErrorCode::E6030,
        format!("Expected {expected} arguments but got {got}."),
        span,
    )
}

#[cold]
pub(crate) fn not_callable(span: Span) -> EvalError {
    EvalError::new(
        ErrorCode::E6032,
        "Can only call functions and classes.",
        span,
    )
}

#[cold]
pub(crate) fn superclass_not_class(span: Span) -> EvalError {
    EvalError::new(ErrorCode::E6033, "Superclass must be a class.", span)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn eval_error_converts_to_diagnostic() {
        let error = division_by_zero(Span::new(4, 5));
        let diag = error.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E6001);
        assert_eq!(diag.primary_span(), Some(Span::new(4, 5)));
    }

    #[test]
    fn messages_carry_the_offending_name() {
        let error = undefined_variable("muffin", Span::new(0, 6));
        assert_eq!(error.message, "Undefined variable 'muffin'.");
        let error = undefined_property("filling", Span::new(0, 7));
        assert_eq!(error.message, "Undefined property 'filling'.");
    }

    #[test]
    fn arity_message_spells_out_both_counts() {
        let error = arity_mismatch(2, 3, Span::point(9));
        assert_eq!(error.message, "Expected 2 arguments but got 3.");
    }
}
