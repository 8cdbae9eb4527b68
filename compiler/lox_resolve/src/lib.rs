//! Static name resolution for Lox.
//!
//! Walks the parsed program once, before anything runs, and computes for
//! every variable use how many environment hops separate the use from its
//! definition. The interpreter then jumps straight to the owning scope
//! instead of searching the chain, which also freezes closure bindings at
//! the point the closure was created.
//!
//! Misuse that can be caught without running code is reported here:
//! reading a variable in its own initializer, redeclaring a local,
//! `return`/`this`/`super` outside the constructs that give them meaning,
//! and a class inheriting from itself. Errors accumulate; the pass always
//! finishes the whole program.

mod resolver;

pub use resolver::Resolver;

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{Ast, ExprId, Span, StmtId, StringInterner};
use rustc_hash::FxHashMap;

/// Hop counts for expressions that resolved to a local binding.
///
/// Expressions absent from the table refer to globals and are looked up
/// by name at runtime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolutions {
    hops: FxHashMap<ExprId, u32>,
}

impl Resolutions {
    pub(crate) fn insert(&mut self, expr: ExprId, hops: u32) {
        self.hops.insert(expr, hops);
    }

    /// Environment hops for a resolved local; `None` means global.
    pub fn hops(&self, expr: ExprId) -> Option<u32> {
        self.hops.get(&expr).copied()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Result of resolving a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveResult {
    pub resolutions: Resolutions,
    pub errors: Vec<ResolveError>,
}

impl ResolveResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Resolution error with a stable code for diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResolveError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
}

impl ResolveError {
    /// Create a new resolution error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ResolveError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Convert to a full `Diagnostic` for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

/// Resolve a parsed program.
pub fn resolve(ast: &Ast, roots: &[StmtId], interner: &StringInterner) -> ResolveResult {
    Resolver::new(ast, interner).resolve_program(roots)
}
