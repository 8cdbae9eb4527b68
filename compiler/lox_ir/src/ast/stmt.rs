//! Statement nodes and function declarations.

use std::fmt;

use crate::{ExprId, FunctionId, FunctionRange, Name, Span, StmtId, StmtRange};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
///
/// `for` does not appear here: the parser desugars it into a `While`
/// wrapped in a `Block`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression statement: expr;
    Expression(ExprId),

    /// Print statement: print expr;
    Print(ExprId),

    /// Variable declaration: var name ( = init )? ;
    Var {
        name: Name,
        /// Span of the name token.
        name_span: Span,
        /// `ExprId::INVALID` = no initializer (the variable starts as nil).
        init: ExprId,
    },

    /// Block: { stmts }
    Block(StmtRange),

    /// Conditional: if (cond) then else?
    If {
        cond: ExprId,
        then_branch: StmtId,
        /// `StmtId::INVALID` = no else branch.
        else_branch: StmtId,
    },

    /// Loop: while (cond) body
    While { cond: ExprId, body: StmtId },

    /// Function declaration: fun name(params) { body }
    Function(FunctionId),

    /// Return: return expr? ;
    Return {
        /// Span of the `return` keyword token.
        keyword_span: Span,
        /// `ExprId::INVALID` = bare `return;` (yields nil).
        value: ExprId,
    },

    /// Class declaration: class Name ( < Superclass )? { methods }
    Class {
        name: Name,
        /// Span of the name token.
        name_span: Span,
        /// `ExprId::INVALID` = no superclass. Otherwise a `Variable`
        /// expression naming it, so the resolver and interpreter treat the
        /// superclass reference like any other variable read.
        superclass: ExprId,
        methods: FunctionRange,
    },
}

/// A function declaration: a named `fun` statement or a class method.
///
/// Stored in the arena's function table; `StmtKind::Function` and
/// `StmtKind::Class` refer to entries by `FunctionId`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Name>,
    /// One span per parameter, for arity and redeclaration diagnostics.
    pub param_spans: Vec<Span>,
    pub body: StmtRange,
    /// Span of the declaration's name token.
    pub name_span: Span,
}

impl FunctionDecl {
    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_decl_arity() {
        let decl = FunctionDecl {
            name: Name::EMPTY,
            params: vec![Name::new(0, 1), Name::new(0, 2)],
            param_spans: vec![Span::DUMMY, Span::DUMMY],
            body: StmtRange::EMPTY,
            name_span: Span::DUMMY,
        };
        assert_eq!(decl.arity(), 2);
    }

    #[test]
    fn stmt_kind_optional_children_use_sentinels() {
        let stmt = StmtKind::Var {
            name: Name::EMPTY,
            name_span: Span::DUMMY,
            init: ExprId::INVALID,
        };
        let StmtKind::Var { init, .. } = stmt else {
            panic!("expected Var");
        };
        assert!(!init.is_valid());
    }
}
