//! Expression nodes.
//!
//! All children are arena indices, not boxes. Optional children use
//! `ExprId::INVALID` as the absent sentinel.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use crate::{ExprId, ExprRange, Name, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.span.hash(state);
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// A literal value as it appears in source.
///
/// Numbers store f64 bits so the enum stays `Eq + Hash`; string text is
/// interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    /// f64 stored as bits.
    Number(u64),
    Str(Name),
}

impl LiteralValue {
    /// Wrap an f64 as a number literal.
    #[inline]
    pub fn number(value: f64) -> Self {
        LiteralValue::Number(value.to_bits())
    }

    /// The f64 value of a `Number` literal.
    #[inline]
    pub fn as_number(self) -> Option<f64> {
        match self {
            LiteralValue::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

impl fmt::Debug for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => write!(f, "Nil"),
            LiteralValue::Bool(b) => write!(f, "Bool({b})"),
            LiteralValue::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            LiteralValue::Str(name) => write!(f, "Str({name:?})"),
        }
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Literal: nil, true, 42, "text"
    Literal(LiteralValue),

    /// Parenthesized expression: (inner)
    Grouping(ExprId),

    /// Unary operation: op operand. The operator token begins the node's
    /// span, so operand type errors point at the node's start.
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        /// Span of the operator token, where operand type errors point.
        op_span: Span,
        left: ExprId,
        right: ExprId,
    },

    /// Short-circuiting logical operation: left and/or right
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },

    /// Variable reference
    Variable(Name),

    /// Assignment: name = value
    Assign { name: Name, value: ExprId },

    /// Call: callee(args). The node's own span locates the closing paren
    /// for arity and not-callable error positions.
    Call { callee: ExprId, args: ExprRange },

    /// Property access: object.name
    Get {
        object: ExprId,
        name: Name,
        /// Span of the property name token.
        name_span: Span,
    },

    /// Property assignment: object.name = value
    Set {
        object: ExprId,
        name: Name,
        /// Span of the property name token.
        name_span: Span,
        value: ExprId,
    },

    /// `this` inside a method body
    This,

    /// `super.method` inside a subclass method body. The node's span is
    /// the `super` keyword token itself.
    Super {
        method: Name,
        /// Span of the method name token.
        method_span: Span,
    },
}
