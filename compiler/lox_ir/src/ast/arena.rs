//! Flat syntax-tree arena.
//!
//! [`Ast`] owns every node produced by a parse: expressions, statements,
//! and function declarations live in parallel vectors and refer to each
//! other by [`ExprId`], [`StmtId`], and [`FunctionId`]. Variable-length
//! children (call arguments, block bodies, method lists) are flattened
//! into side lists addressed by ranges, so a node stays `Copy` no matter
//! how many children it has.
//!
//! # Index Spaces
//!
//! - `exprs`: indexed by [`ExprId`]
//! - `stmts`: indexed by [`StmtId`]
//! - `functions`: indexed by [`FunctionId`]
//! - `expr_lists`: flat `Vec<ExprId>` indexed by [`ExprRange`]
//! - `stmt_lists`: flat `Vec<StmtId>` indexed by [`StmtRange`]
//! - `function_lists`: flat `Vec<FunctionId>` indexed by [`FunctionRange`]

use crate::{
    Expr, ExprId, ExprRange, FunctionDecl, FunctionId, FunctionRange, Stmt, StmtId, StmtRange,
};

/// Convert a vector length to a `u32` index, panicking on overflow.
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what} for u32 index"))
}

/// Convert a list length to a `u16` range length, panicking on overflow.
fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("{what} too long for u16 length"))
}

/// Arena holding one program's entire syntax tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Ast {
    /// Expression nodes (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Statement nodes (indexed by `StmtId`).
    stmts: Vec<Stmt>,
    /// Function declarations: named functions and class methods.
    functions: Vec<FunctionDecl>,
    /// Flattened expression ID lists (call arguments).
    expr_lists: Vec<ExprId>,
    /// Flattened statement ID lists (block and function bodies).
    stmt_lists: Vec<StmtId>,
    /// Flattened function ID lists (class method tables).
    function_lists: Vec<FunctionId>,
}

impl Ast {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena pre-allocated based on source length.
    ///
    /// Estimates ~1 node per 20 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 20;
        Self {
            exprs: Vec::with_capacity(estimated),
            stmts: Vec::with_capacity(estimated / 4),
            functions: Vec::new(),
            expr_lists: Vec::new(),
            stmt_lists: Vec::with_capacity(estimated / 4),
            function_lists: Vec::new(),
        }
    }

    /// Allocate an expression node, returning its ID.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement node, returning its ID.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    /// Allocate a function declaration, returning its ID.
    pub fn alloc_function(&mut self, decl: FunctionDecl) -> FunctionId {
        let id = FunctionId::new(to_u32(self.functions.len(), "functions"));
        self.functions.push(decl);
        id
    }

    /// Get an expression node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is `ExprId::INVALID` or out of bounds.
    #[inline]
    pub fn expr(&self, id: ExprId) -> Expr {
        self.exprs[id.index()]
    }

    /// Get a statement node.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> Stmt {
        self.stmts[id.index()]
    }

    /// Get a function declaration.
    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    /// Number of allocated expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of allocated statements.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Allocate a contiguous range of expression IDs.
    ///
    /// Children are parsed (and allocated) before the list is sealed, so
    /// the IDs themselves need not be contiguous; the side list is.
    pub fn alloc_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend_from_slice(ids);
        ExprRange::new(start, to_u16(ids.len(), "expression list"))
    }

    /// Get expression IDs from a range.
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Allocate a contiguous range of statement IDs.
    pub fn alloc_stmt_list(&mut self, ids: &[StmtId]) -> StmtRange {
        if ids.is_empty() {
            return StmtRange::EMPTY;
        }
        let start = to_u32(self.stmt_lists.len(), "statement lists");
        self.stmt_lists.extend_from_slice(ids);
        StmtRange::new(start, to_u16(ids.len(), "statement list"))
    }

    /// Get statement IDs from a range.
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    /// Allocate a contiguous range of function IDs.
    pub fn alloc_function_list(&mut self, ids: &[FunctionId]) -> FunctionRange {
        if ids.is_empty() {
            return FunctionRange::EMPTY;
        }
        let start = to_u32(self.function_lists.len(), "function lists");
        self.function_lists.extend_from_slice(ids);
        FunctionRange::new(start, to_u16(ids.len(), "function list"))
    }

    /// Get function IDs from a range.
    pub fn function_list(&self, range: FunctionRange) -> &[FunctionId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.function_lists[start..start + range.len()]
    }
}
