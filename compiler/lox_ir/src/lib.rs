//! Lox IR - Intermediate Representation Types
//!
//! This crate contains the core data structures shared by every phase of
//! the interpreter:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - AST nodes (Expr, Stmt, `FunctionDecl`) and their arena
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Expr>, use `ExprId(u32)` indices
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.
//! Types that contain strings use interned Name for O(1) equality.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod node_id;
mod number;
mod span;
mod token;

pub use ast::{
    Ast, BinaryOp, Expr, ExprKind, FunctionDecl, LiteralValue, LogicalOp, Stmt, StmtKind, UnaryOp,
};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use node_id::{ExprId, ExprRange, FunctionId, FunctionRange, StmtId, StmtRange};
pub use number::format_number;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
