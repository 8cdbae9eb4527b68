//! The resolution pass.
//!
//! A scope is a map from name to a definition flag: `false` while only
//! declared, `true` once defined. The split is what catches
//! `var a = a;`, where the initializer runs while `a` is declared but
//! not yet defined. The global scope is not modeled; names that fall
//! off the bottom of the stack resolve at runtime against the global
//! environment.

use lox_diagnostic::ErrorCode;
use lox_ir::{
    Ast, ExprId, ExprKind, FunctionId, FunctionRange, Name, Span, StmtId, StmtKind, StringInterner,
};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{Resolutions, ResolveError, ResolveResult};

/// What kind of function body the walk is inside. Gates `return`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FunctionContext {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body the walk is inside. Gates `this` and `super`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ClassContext {
    None,
    Class,
    Subclass,
}

/// Walks the AST computing hop counts and checking static rules.
pub struct Resolver<'a> {
    ast: &'a Ast,
    /// Innermost scope last; `false` = declared, `true` = defined.
    scopes: Vec<FxHashMap<Name, bool>>,
    resolutions: Resolutions,
    errors: Vec<ResolveError>,
    current_function: FunctionContext,
    current_class: ClassContext,
    this_name: Name,
    super_name: Name,
    init_name: Name,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for one program.
    pub fn new(ast: &'a Ast, interner: &StringInterner) -> Self {
        Resolver {
            ast,
            scopes: Vec::new(),
            resolutions: Resolutions::default(),
            errors: Vec::new(),
            current_function: FunctionContext::None,
            current_class: ClassContext::None,
            this_name: interner.intern("this"),
            super_name: interner.intern("super"),
            init_name: interner.intern("init"),
        }
    }

    /// Resolve a whole program.
    pub fn resolve_program(mut self, roots: &[StmtId]) -> ResolveResult {
        debug!(roots = roots.len(), "resolve_program");
        for &stmt in roots {
            self.resolve_stmt(stmt);
        }

        ResolveResult {
            resolutions: self.resolutions,
            errors: self.errors,
        }
    }

    /// Resolve one statement.
    ///
    /// Grows the stack when needed; blocks and expressions recurse here.
    fn resolve_stmt(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.resolve_stmt_inner(id));
    }

    fn resolve_stmt_inner(&mut self, id: StmtId) {
        let ast = self.ast;
        match ast.stmt(id).kind {
            StmtKind::Expression(expr) | StmtKind::Print(expr) => self.resolve_expr(expr),
            StmtKind::Var {
                name,
                name_span,
                init,
            } => {
                self.declare(name, name_span);
                if init.is_valid() {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            StmtKind::Block(range) => {
                self.begin_scope();
                for &stmt in ast.stmt_list(range) {
                    self.resolve_stmt(stmt);
                }
                self.end_scope();
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond);
                self.resolve_stmt(then_branch);
                if else_branch.is_valid() {
                    self.resolve_stmt(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.resolve_expr(cond);
                self.resolve_stmt(body);
            }
            StmtKind::Function(function) => {
                let decl = ast.function(function);
                self.declare(decl.name, decl.name_span);
                self.define(decl.name);
                self.resolve_function(function, FunctionContext::Function);
            }
            StmtKind::Return {
                keyword_span,
                value,
            } => {
                if self.current_function == FunctionContext::None {
                    self.report(
                        ErrorCode::E2003,
                        "Can't return from top-level code.",
                        keyword_span,
                    );
                }
                if value.is_valid() {
                    if self.current_function == FunctionContext::Initializer {
                        self.report(
                            ErrorCode::E2004,
                            "Can't return a value from an initializer.",
                            keyword_span,
                        );
                    }
                    self.resolve_expr(value);
                }
            }
            StmtKind::Class {
                name,
                name_span,
                superclass,
                methods,
            } => self.resolve_class(name, name_span, superclass, methods),
        }
    }

    fn resolve_class(
        &mut self,
        name: Name,
        name_span: Span,
        superclass: ExprId,
        methods: FunctionRange,
    ) {
        let ast = self.ast;
        let enclosing = std::mem::replace(&mut self.current_class, ClassContext::Class);

        self.declare(name, name_span);
        self.define(name);

        if superclass.is_valid() {
            let superclass_expr = ast.expr(superclass);
            if let ExprKind::Variable(super_name) = superclass_expr.kind {
                if super_name == name {
                    self.report(
                        ErrorCode::E2008,
                        "A class can't inherit from itself.",
                        superclass_expr.span,
                    );
                }
            }
            self.current_class = ClassContext::Subclass;
            self.resolve_expr(superclass);

            // Methods of a subclass close over a scope binding `super`.
            self.begin_scope();
            self.define(self.super_name);
        }

        self.begin_scope();
        self.define(self.this_name);

        for &method in ast.function_list(methods) {
            let context = if ast.function(method).name == self.init_name {
                FunctionContext::Initializer
            } else {
                FunctionContext::Method
            };
            self.resolve_function(method, context);
        }

        self.end_scope();
        if superclass.is_valid() {
            self.end_scope();
        }

        self.current_class = enclosing;
    }

    /// Resolve a function body in a fresh scope, with `context` saying
    /// what kind of function it is.
    fn resolve_function(&mut self, function: FunctionId, context: FunctionContext) {
        let ast = self.ast;
        let decl = ast.function(function);

        let enclosing = std::mem::replace(&mut self.current_function, context);
        self.begin_scope();
        for (&param, &span) in decl.params.iter().zip(&decl.param_spans) {
            self.declare(param, span);
            self.define(param);
        }
        for &stmt in ast.stmt_list(decl.body) {
            self.resolve_stmt(stmt);
        }
        self.end_scope();
        self.current_function = enclosing;
    }

    /// Resolve one expression.
    fn resolve_expr(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.resolve_expr_inner(id));
    }

    fn resolve_expr_inner(&mut self, id: ExprId) {
        let ast = self.ast;
        let expr = ast.expr(id);
        match expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Grouping(inner) => self.resolve_expr(inner),
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Variable(name) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name) == Some(&false) {
                        self.report(
                            ErrorCode::E2001,
                            "Can't read local variable in its own initializer.",
                            expr.span,
                        );
                    }
                }
                self.resolve_local(id, name);
            }
            ExprKind::Assign { name, value } => {
                self.resolve_expr(value);
                self.resolve_local(id, name);
            }
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                for &arg in ast.expr_list(args) {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Get { object, .. } => self.resolve_expr(object),
            ExprKind::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
            ExprKind::This => {
                if self.current_class == ClassContext::None {
                    self.report(
                        ErrorCode::E2005,
                        "Can't use 'this' outside of a class.",
                        expr.span,
                    );
                    return;
                }
                self.resolve_local(id, self.this_name);
            }
            ExprKind::Super { .. } => {
                match self.current_class {
                    ClassContext::None => self.report(
                        ErrorCode::E2006,
                        "Can't use 'super' outside of a class.",
                        expr.span,
                    ),
                    ClassContext::Class => self.report(
                        ErrorCode::E2007,
                        "Can't use 'super' in a class with no superclass.",
                        expr.span,
                    ),
                    ClassContext::Subclass => {}
                }
                self.resolve_local(id, self.super_name);
            }
        }
    }

    /// Record the hop count to the innermost scope that knows `name`.
    /// Names found in no scope are globals, looked up at runtime.
    fn resolve_local(&mut self, id: ExprId, name: Name) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name) {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "scope depth always fits u32"
                )]
                let hops = depth as u32;
                trace!(expr = id.index(), hops, "resolve_local");
                self.resolutions.insert(id, hops);
                return;
            }
        }
    }

    /// Declare a name in the innermost scope without defining it. In the
    /// global scope this is a no-op; globals bind at runtime.
    fn declare(&mut self, name: Name, span: Span) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        let redeclared = scope.contains_key(&name);
        scope.insert(name, false);
        if redeclared {
            self.report(
                ErrorCode::E2002,
                "Already a variable with this name in this scope.",
                span,
            );
        }
    }

    /// Mark a name fully defined in the innermost scope.
    fn define(&mut self, name: Name) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, true);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn report(&mut self, code: ErrorCode, message: &'static str, span: Span) {
        self.errors.push(ResolveError::new(code, message, span));
    }
}

#[cfg(test)]
mod tests {
    use lox_parse::ParseResult;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resolve;

    fn run_resolver(source: &str) -> (ParseResult, ResolveResult) {
        let interner = StringInterner::new();
        let (tokens, lex_errors) = lox_lexer::lex(source, &interner);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        let parsed = lox_parse::parse(&tokens);
        assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
        let result = resolve(&parsed.ast, &parsed.roots, &interner);
        (parsed, result)
    }

    fn resolve_clean(source: &str) -> (ParseResult, ResolveResult) {
        let (parsed, result) = run_resolver(source);
        assert!(!result.has_errors(), "resolve errors: {:?}", result.errors);
        (parsed, result)
    }

    fn block_stmts(parsed: &ParseResult, id: StmtId) -> Vec<StmtId> {
        let StmtKind::Block(range) = parsed.ast.stmt(id).kind else {
            panic!("expected block");
        };
        parsed.ast.stmt_list(range).to_vec()
    }

    fn print_operand(parsed: &ParseResult, id: StmtId) -> ExprId {
        let StmtKind::Print(expr) = parsed.ast.stmt(id).kind else {
            panic!("expected print");
        };
        expr
    }

    fn class_methods(parsed: &ParseResult, id: StmtId) -> Vec<FunctionId> {
        let StmtKind::Class { methods, .. } = parsed.ast.stmt(id).kind else {
            panic!("expected class");
        };
        parsed.ast.function_list(methods).to_vec()
    }

    #[test]
    fn local_read_in_same_scope_has_zero_hops() {
        let (parsed, result) = resolve_clean("{ var a = 1; print a; }");

        let stmts = block_stmts(&parsed, parsed.roots[0]);
        let expr = print_operand(&parsed, stmts[1]);
        assert_eq!(result.resolutions.hops(expr), Some(0));
    }

    #[test]
    fn hop_count_crosses_function_boundary() {
        let (parsed, result) = resolve_clean("{ var a = 1; fun f() { print a; } }");

        let stmts = block_stmts(&parsed, parsed.roots[0]);
        let StmtKind::Function(function) = parsed.ast.stmt(stmts[1]).kind else {
            panic!("expected function declaration");
        };
        let body = parsed.ast.stmt_list(parsed.ast.function(function).body);
        let expr = print_operand(&parsed, body[0]);
        assert_eq!(result.resolutions.hops(expr), Some(1));
    }

    #[test]
    fn global_references_are_left_for_runtime() {
        let (parsed, result) = resolve_clean("var a = 1; print a;");

        let expr = print_operand(&parsed, parsed.roots[1]);
        assert_eq!(result.resolutions.hops(expr), None);
        assert!(result.resolutions.is_empty());
    }

    #[test]
    fn shadowing_resolves_to_the_nearest_binding() {
        let (parsed, result) = resolve_clean("{ var a = 1; { var a = 2; print a; } }");

        let outer = block_stmts(&parsed, parsed.roots[0]);
        let inner = block_stmts(&parsed, outer[1]);
        let expr = print_operand(&parsed, inner[1]);
        assert_eq!(result.resolutions.hops(expr), Some(0));
    }

    #[test]
    fn parameters_resolve_in_the_function_scope() {
        let (parsed, result) = resolve_clean("fun f(a) { return a; }");

        let StmtKind::Function(function) = parsed.ast.stmt(parsed.roots[0]).kind else {
            panic!("expected function declaration");
        };
        let body = parsed.ast.stmt_list(parsed.ast.function(function).body);
        let StmtKind::Return { value, .. } = parsed.ast.stmt(body[0]).kind else {
            panic!("expected return");
        };
        assert_eq!(result.resolutions.hops(value), Some(0));
    }

    #[test]
    fn self_initializer_read_is_reported() {
        let (_, result) = run_resolver("{ var a = a; }");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2001);
        assert_eq!(
            result.errors[0].message,
            "Can't read local variable in its own initializer."
        );
    }

    #[test]
    fn global_self_initializer_is_allowed() {
        // Globals bind at runtime; `var a = a;` at top level reads the
        // (possibly undefined) global, which is not this pass's problem.
        let (_, result) = run_resolver("var a = a;");
        assert!(!result.has_errors());
    }

    #[test]
    fn local_redeclaration_is_reported() {
        let (_, result) = run_resolver("{ var a = 1; var a = 2; }");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2002);
        assert_eq!(
            result.errors[0].message,
            "Already a variable with this name in this scope."
        );
    }

    #[test]
    fn redeclaring_a_global_is_allowed() {
        let (_, result) = run_resolver("var a = 1; var a = 2;");
        assert!(!result.has_errors());
    }

    #[test]
    fn top_level_return_is_reported() {
        let (_, result) = run_resolver("return 1;");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2003);
        assert_eq!(result.errors[0].message, "Can't return from top-level code.");
        assert_eq!(result.errors[0].span, Span::new(0, 6));
    }

    #[test]
    fn initializer_cannot_return_a_value() {
        let (_, result) = run_resolver("class A { init() { return 1; } }");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2004);
        assert_eq!(
            result.errors[0].message,
            "Can't return a value from an initializer."
        );
    }

    #[test]
    fn bare_return_in_initializer_is_allowed() {
        let (_, result) = run_resolver("class A { init() { return; } }");
        assert!(!result.has_errors());
    }

    #[test]
    fn this_outside_a_class_is_reported() {
        let (_, result) = run_resolver("print this;");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2005);
        assert_eq!(
            result.errors[0].message,
            "Can't use 'this' outside of a class."
        );
    }

    #[test]
    fn this_in_a_plain_function_is_reported() {
        let (_, result) = run_resolver("fun f() { return this; }");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2005);
    }

    #[test]
    fn super_outside_a_class_is_reported() {
        let (_, result) = run_resolver("super.m();");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2006);
        assert_eq!(
            result.errors[0].message,
            "Can't use 'super' outside of a class."
        );
    }

    #[test]
    fn super_without_a_superclass_is_reported() {
        let (_, result) = run_resolver("class A { m() { super.m(); } }");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2007);
        assert_eq!(
            result.errors[0].message,
            "Can't use 'super' in a class with no superclass."
        );
    }

    #[test]
    fn class_cannot_inherit_from_itself() {
        let (_, result) = run_resolver("class A < A {}");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::E2008);
        assert_eq!(
            result.errors[0].message,
            "A class can't inherit from itself."
        );
        // Reported at the superclass reference, not the class name.
        assert_eq!(result.errors[0].span, Span::new(10, 11));
    }

    #[test]
    fn methods_bind_this_one_scope_out() {
        let (parsed, result) = resolve_clean("class A { m() { return this; } }");

        let methods = class_methods(&parsed, parsed.roots[0]);
        let body = parsed.ast.stmt_list(parsed.ast.function(methods[0]).body);
        let StmtKind::Return { value, .. } = parsed.ast.stmt(body[0]).kind else {
            panic!("expected return");
        };
        assert_eq!(result.resolutions.hops(value), Some(1));
    }

    #[test]
    fn super_binds_outside_the_this_scope() {
        let (parsed, result) =
            resolve_clean("class B {} class A < B { m() { return super.m(); } }");

        let methods = class_methods(&parsed, parsed.roots[1]);
        let body = parsed.ast.stmt_list(parsed.ast.function(methods[0]).body);
        let StmtKind::Return { value, .. } = parsed.ast.stmt(body[0]).kind else {
            panic!("expected return");
        };
        let ExprKind::Call { callee, .. } = parsed.ast.expr(value).kind else {
            panic!("expected super call");
        };
        assert_eq!(result.resolutions.hops(callee), Some(2));
    }

    #[test]
    fn errors_accumulate_across_the_program() {
        let (_, result) = run_resolver("return 1; print this;");

        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].code, ErrorCode::E2003);
        assert_eq!(result.errors[1].code, ErrorCode::E2005);
    }

    #[test]
    fn resolve_error_converts_to_diagnostic() {
        let error = ResolveError::new(
            ErrorCode::E2003,
            "Can't return from top-level code.",
            Span::new(0, 6),
        );
        let diag = error.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2003);
        assert_eq!(diag.primary_span(), Some(Span::new(0, 6)));
    }
}
