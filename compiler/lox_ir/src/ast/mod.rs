//! Flat AST types using arena allocation.
//!
//! Nodes never own their children. `Box<Expr>` does not appear anywhere:
//! children are [`ExprId`](crate::ExprId)/[`StmtId`](crate::StmtId) indices
//! into an [`Ast`] arena, and variable-length children are ranges into the
//! arena's side lists. This keeps every node `Copy` and the whole tree in a
//! handful of contiguous allocations.
//!
//! # Module Structure
//!
//! - `expr`: Expression types (`Expr`, `ExprKind`, `LiteralValue`)
//! - `operators`: Binary, logical, and unary operators
//! - `stmt`: Statement types and `FunctionDecl`
//! - `arena`: The [`Ast`] arena itself

mod arena;
mod expr;
mod operators;
mod stmt;

pub use arena::Ast;
pub use expr::{Expr, ExprKind, LiteralValue};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use stmt::{FunctionDecl, Stmt, StmtKind};
