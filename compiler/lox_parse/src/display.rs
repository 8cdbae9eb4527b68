//! Compact s-expression rendering of parse trees.
//!
//! Renders `1 + 2 * 3` as `(+ 1 (* 2 3))`, which keeps precedence and
//! associativity assertions readable in tests. Statements get the same
//! treatment: `print x;` becomes `(print x)`, blocks become `(block ...)`,
//! and declarations spell out their pieces.

use lox_ir::{
    Ast, ExprId, ExprKind, FunctionId, LiteralValue, StmtId, StmtKind, StringLookup, format_number,
};

/// Prints expressions and statements as s-expressions.
pub struct AstPrinter<'a> {
    ast: &'a Ast,
    names: &'a dyn StringLookup,
}

impl<'a> AstPrinter<'a> {
    pub fn new(ast: &'a Ast, names: &'a dyn StringLookup) -> Self {
        AstPrinter { ast, names }
    }

    /// Render one expression.
    pub fn expr_to_string(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    /// Render one statement.
    pub fn stmt_to_string(&self, id: StmtId) -> String {
        let mut out = String::new();
        self.write_stmt(&mut out, id);
        out
    }

    fn write_expr(&self, out: &mut String, id: ExprId) {
        match self.ast.expr(id).kind {
            ExprKind::Literal(LiteralValue::Nil) => out.push_str("nil"),
            ExprKind::Literal(LiteralValue::Bool(value)) => {
                out.push_str(if value { "true" } else { "false" });
            }
            ExprKind::Literal(LiteralValue::Number(bits)) => {
                out.push_str(&format_number(f64::from_bits(bits)));
            }
            ExprKind::Literal(LiteralValue::Str(name)) => {
                out.push_str(self.names.lookup(name));
            }
            ExprKind::Grouping(inner) => {
                out.push_str("(group ");
                self.write_expr(out, inner);
                out.push(')');
            }
            ExprKind::Unary { op, operand } => {
                out.push('(');
                out.push_str(op.as_symbol());
                out.push(' ');
                self.write_expr(out, operand);
                out.push(')');
            }
            ExprKind::Binary {
                op, left, right, ..
            } => {
                out.push('(');
                out.push_str(op.as_symbol());
                out.push(' ');
                self.write_expr(out, left);
                out.push(' ');
                self.write_expr(out, right);
                out.push(')');
            }
            ExprKind::Logical { op, left, right } => {
                out.push('(');
                out.push_str(op.as_symbol());
                out.push(' ');
                self.write_expr(out, left);
                out.push(' ');
                self.write_expr(out, right);
                out.push(')');
            }
            ExprKind::Variable(name) => out.push_str(self.names.lookup(name)),
            ExprKind::Assign { name, value } => {
                out.push_str("(= ");
                out.push_str(self.names.lookup(name));
                out.push(' ');
                self.write_expr(out, value);
                out.push(')');
            }
            ExprKind::Call { callee, args } => {
                out.push_str("(call ");
                self.write_expr(out, callee);
                for &arg in self.ast.expr_list(args) {
                    out.push(' ');
                    self.write_expr(out, arg);
                }
                out.push(')');
            }
            ExprKind::Get { object, name, .. } => {
                out.push_str("(. ");
                self.write_expr(out, object);
                out.push(' ');
                out.push_str(self.names.lookup(name));
                out.push(')');
            }
            ExprKind::Set {
                object,
                name,
                value,
                ..
            } => {
                out.push_str("(= (. ");
                self.write_expr(out, object);
                out.push(' ');
                out.push_str(self.names.lookup(name));
                out.push_str(") ");
                self.write_expr(out, value);
                out.push(')');
            }
            ExprKind::This => out.push_str("this"),
            ExprKind::Super { method, .. } => {
                out.push_str("(super ");
                out.push_str(self.names.lookup(method));
                out.push(')');
            }
        }
    }

    fn write_stmt(&self, out: &mut String, id: StmtId) {
        match self.ast.stmt(id).kind {
            StmtKind::Expression(expr) => {
                out.push_str("(; ");
                self.write_expr(out, expr);
                out.push(')');
            }
            StmtKind::Print(expr) => {
                out.push_str("(print ");
                self.write_expr(out, expr);
                out.push(')');
            }
            StmtKind::Var { name, init, .. } => {
                out.push_str("(var ");
                out.push_str(self.names.lookup(name));
                if init.is_valid() {
                    out.push_str(" = ");
                    self.write_expr(out, init);
                }
                out.push(')');
            }
            StmtKind::Block(range) => {
                out.push_str("(block");
                for &stmt in self.ast.stmt_list(range) {
                    out.push(' ');
                    self.write_stmt(out, stmt);
                }
                out.push(')');
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push_str(if else_branch.is_valid() {
                    "(if-else "
                } else {
                    "(if "
                });
                self.write_expr(out, cond);
                out.push(' ');
                self.write_stmt(out, then_branch);
                if else_branch.is_valid() {
                    out.push(' ');
                    self.write_stmt(out, else_branch);
                }
                out.push(')');
            }
            StmtKind::While { cond, body } => {
                out.push_str("(while ");
                self.write_expr(out, cond);
                out.push(' ');
                self.write_stmt(out, body);
                out.push(')');
            }
            StmtKind::Function(function) => self.write_function(out, function),
            StmtKind::Return { value, .. } => {
                if value.is_valid() {
                    out.push_str("(return ");
                    self.write_expr(out, value);
                    out.push(')');
                } else {
                    out.push_str("(return)");
                }
            }
            StmtKind::Class {
                name,
                superclass,
                methods,
                ..
            } => {
                out.push_str("(class ");
                out.push_str(self.names.lookup(name));
                if superclass.is_valid() {
                    out.push_str(" < ");
                    self.write_expr(out, superclass);
                }
                for &method in self.ast.function_list(methods) {
                    out.push(' ');
                    self.write_function(out, method);
                }
                out.push(')');
            }
        }
    }

    fn write_function(&self, out: &mut String, id: FunctionId) {
        let decl = self.ast.function(id);
        out.push_str("(fun ");
        out.push_str(self.names.lookup(decl.name));
        out.push('(');
        for (index, &param) in decl.params.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            out.push_str(self.names.lookup(param));
        }
        out.push(')');
        for &stmt in self.ast.stmt_list(decl.body) {
            out.push(' ');
            self.write_stmt(out, stmt);
        }
        out.push(')');
    }
}
