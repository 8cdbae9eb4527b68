//! Grammar productions, split by syntactic category.
//!
//! Each submodule extends [`Parser`](crate::Parser) with the parsing
//! methods for one slice of the grammar:
//!
//! - [`decl`]: declarations (`class`, `fun`, `var`)
//! - [`stmt`]: statements (`if`, `while`, `for`, `print`, `return`, blocks)
//! - [`expr`]: the expression precedence cascade

mod decl;
mod expr;
mod stmt;
