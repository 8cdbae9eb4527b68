//! Behavioral tests that drive whole programs through the interpreter
//! and assert on printed output, runtime errors, or both.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use lox_diagnostic::ErrorCode;
use lox_ir::{Span, StmtId, StringInterner};
use pretty_assertions::assert_eq;

use crate::error::EvalError;
use crate::print_handler::buffer_handler;
use crate::{Interpreter, Program};

fn compile(interner: &StringInterner, source: &str) -> (Program, Vec<StmtId>) {
    let (tokens, lex_errors) = lox_lexer::lex(source, interner);
    assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
    let parsed = lox_parse::parse(&tokens);
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    let resolved = lox_resolve::resolve(&parsed.ast, &parsed.roots, interner);
    assert!(
        resolved.errors.is_empty(),
        "resolve errors: {:?}",
        resolved.errors
    );
    (Program::new(parsed.ast, resolved.resolutions), parsed.roots)
}

/// Run a program, returning printed output and the interpreter verdict.
fn run_capture(source: &str) -> (String, Result<(), EvalError>) {
    let interner = StringInterner::new();
    let (program, roots) = compile(&interner, source);
    let handler = buffer_handler();
    let mut interpreter = Interpreter::new(&interner, handler.clone());
    let result = interpreter.interpret(&program, &roots);
    (handler.get_output(), result)
}

/// Run a program expected to succeed and return everything printed.
fn run(source: &str) -> String {
    let (output, result) = run_capture(source);
    if let Err(error) = result {
        panic!("runtime error: {error:?}");
    }
    output
}

/// Run a program expected to fail and return the error.
fn run_err(source: &str) -> EvalError {
    let (_, result) = run_capture(source);
    match result {
        Ok(()) => panic!("expected a runtime error"),
        Err(error) => error,
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(run("print 1 + 2 * 3;"), "7\n");
    assert_eq!(run("print (1 + 2) * 3;"), "9\n");
}

#[test]
fn division_produces_fractions() {
    assert_eq!(run("print 7 / 2;"), "3.5\n");
    assert_eq!(run("print 4 / 2;"), "2\n");
}

#[test]
fn strings_concatenate_with_plus() {
    assert_eq!(run("print \"foo\" + \"bar\";"), "foobar\n");
}

#[test]
fn comparison_operators() {
    assert_eq!(
        run("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 4;"),
        "true\ntrue\nfalse\ntrue\n"
    );
}

#[test]
fn equality_follows_value_semantics() {
    assert_eq!(
        run("print 1 == 1; print nil == nil; print 1 == \"1\"; print \"a\" == \"a\";"),
        "true\ntrue\nfalse\ntrue\n"
    );
    assert_eq!(run("print 1 != 2;"), "true\n");
}

#[test]
fn unary_operators() {
    assert_eq!(run("print -3; print !true; print !nil;"), "-3\nfalse\ntrue\n");
}

#[test]
fn zero_and_empty_string_are_truthy() {
    assert_eq!(run("print !0; print !\"\";"), "false\nfalse\n");
}

#[test]
fn negative_zero_prints_with_sign() {
    assert_eq!(run("print -0;"), "-0\n");
}

#[test]
fn or_returns_the_deciding_operand() {
    assert_eq!(run("print \"hi\" or 2; print nil or \"yes\";"), "hi\nyes\n");
}

#[test]
fn and_returns_the_deciding_operand() {
    assert_eq!(run("print nil and 2; print 1 and 2;"), "nil\n2\n");
}

#[test]
fn and_short_circuit_skips_side_effects() {
    assert_eq!(run("var a = 1; false and (a = 2); print a;"), "1\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(run("var a = 1; print a = 3;"), "3\n");
}

#[test]
fn uninitialized_variable_is_nil() {
    assert_eq!(run("var a; print a;"), "nil\n");
}

#[test]
fn blocks_shadow_and_restore() {
    let source = "
        var a = \"global\";
        {
          var a = \"local\";
          print a;
        }
        print a;
    ";
    assert_eq!(run(source), "local\nglobal\n");
}

#[test]
fn closures_capture_their_defining_environment() {
    let source = "
        fun makeCounter() {
          var i = 0;
          fun count() {
            i = i + 1;
            print i;
          }
          return count;
        }
        var counter = makeCounter();
        counter();
        counter();
    ";
    assert_eq!(run(source), "1\n2\n");
}

#[test]
fn closure_bindings_freeze_at_creation() {
    // The hop count recorded for `a` inside `show` keeps pointing at the
    // global even after the block declares its own `a`.
    let source = "
        var a = \"global\";
        {
          fun show() {
            print a;
          }
          show();
          var a = \"block\";
          show();
        }
    ";
    assert_eq!(run(source), "global\nglobal\n");
}

#[test]
fn if_else_branches() {
    assert_eq!(run("if (true) print \"then\"; else print \"else\";"), "then\n");
    assert_eq!(run("if (false) print \"then\"; else print \"else\";"), "else\n");
}

#[test]
fn while_loop_counts() {
    assert_eq!(
        run("var i = 0; while (i < 3) { print i; i = i + 1; }"),
        "0\n1\n2\n"
    );
}

#[test]
fn for_loop_counts() {
    assert_eq!(run("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
}

#[test]
fn function_call_returns_a_value() {
    assert_eq!(
        run("fun add(a, b) { return a + b; } print add(1, 2);"),
        "3\n"
    );
}

#[test]
fn function_without_return_yields_nil() {
    assert_eq!(run("fun f() {} print f();"), "nil\n");
}

#[test]
fn return_unwinds_a_loop() {
    let source = "
        fun f() {
          while (true) {
            return \"done\";
          }
        }
        print f();
    ";
    assert_eq!(run(source), "done\n");
}

#[test]
fn recursion() {
    let source = "
        fun fib(n) {
          if (n < 2) return n;
          return fib(n - 1) + fib(n - 2);
        }
        print fib(10);
    ";
    assert_eq!(run(source), "55\n");
}

#[test]
fn functions_print_their_name() {
    assert_eq!(run("fun f() {} print f;"), "<fn f>\n");
}

#[test]
fn clock_native_is_predefined() {
    assert_eq!(run("print clock() >= 0;"), "true\n");
    assert_eq!(run("print clock;"), "<native fn>\n");
}

#[test]
fn classes_print_their_name() {
    assert_eq!(run("class A {} print A;"), "A\n");
}

#[test]
fn instances_print_class_and_suffix() {
    assert_eq!(run("class A {} print A();"), "A instance\n");
}

#[test]
fn fields_are_stored_per_instance() {
    let source = "
        class Box {}
        var a = Box();
        var b = Box();
        a.value = 42;
        b.value = 7;
        print a.value;
        print b.value;
    ";
    assert_eq!(run(source), "42\n7\n");
}

#[test]
fn methods_bind_this() {
    let source = "
        class Greeter {
          greet() {
            print \"hi \" + this.name;
          }
        }
        var g = Greeter();
        g.name = \"jo\";
        g.greet();
    ";
    assert_eq!(run(source), "hi jo\n");
}

#[test]
fn initializer_receives_arguments() {
    let source = "
        class Point {
          init(x, y) {
            this.x = x;
            this.y = y;
          }
        }
        var p = Point(1, 2);
        print p.x + p.y;
    ";
    assert_eq!(run(source), "3\n");
}

#[test]
fn initializer_returns_the_instance_even_on_early_return() {
    let source = "
        class Early {
          init() {
            this.tag = \"set\";
            return;
          }
        }
        var e = Early();
        print e;
        print e.tag;
    ";
    assert_eq!(run(source), "Early instance\nset\n");
}

#[test]
fn calling_init_directly_returns_the_instance() {
    let source = "
        class A {
          init() {}
        }
        var a = A();
        print a.init();
    ";
    assert_eq!(run(source), "A instance\n");
}

#[test]
fn methods_inherit_from_the_superclass() {
    let source = "
        class A {
          m() {
            return \"from A\";
          }
        }
        class B < A {}
        print B().m();
    ";
    assert_eq!(run(source), "from A\n");
}

#[test]
fn subclass_overrides_shadow_inherited_methods() {
    let source = "
        class A {
          m() {
            return \"from A\";
          }
        }
        class B < A {
          m() {
            return \"from B\";
          }
        }
        print B().m();
    ";
    assert_eq!(run(source), "from B\n");
}

#[test]
fn super_calls_the_superclass_method() {
    let source = "
        class Doughnut {
          cook() {
            print \"Fry until golden brown.\";
          }
        }
        class BostonCream < Doughnut {
          cook() {
            super.cook();
            print \"Pipe full of custard and coat with chocolate.\";
          }
        }
        BostonCream().cook();
    ";
    assert_eq!(
        run(source),
        "Fry until golden brown.\nPipe full of custard and coat with chocolate.\n"
    );
}

#[test]
fn bound_methods_remember_their_instance() {
    let source = "
        class Person {
          sayName() {
            print this.name;
          }
        }
        var jane = Person();
        jane.name = \"Jane\";
        var method = jane.sayName;
        method();
    ";
    assert_eq!(run(source), "Jane\n");
}

#[test]
fn fields_shadow_methods() {
    let source = "
        class A {
          m() {
            return \"method\";
          }
        }
        var a = A();
        print a.m();
        a.m = \"field\";
        print a.m;
    ";
    assert_eq!(run(source), "method\nfield\n");
}

#[test]
fn methods_can_reference_the_class_name() {
    let source = "
        class Factory {
          make() {
            return Factory();
          }
        }
        print Factory().make();
    ";
    assert_eq!(run(source), "Factory instance\n");
}

#[test]
fn division_by_zero_is_an_error() {
    let error = run_err("1 / 0;");
    assert_eq!(error.code, ErrorCode::E6001);
    assert_eq!(error.message, "Division by zero.");
    // Reported at the operator.
    assert_eq!(error.span, Span::new(2, 3));
}

#[test]
fn negating_a_string_is_an_error() {
    let error = run_err("-\"muffin\";");
    assert_eq!(error.code, ErrorCode::E6010);
    assert_eq!(error.message, "Operand must be a number.");
}

#[test]
fn subtracting_a_string_is_an_error() {
    let error = run_err("1 - \"a\";");
    assert_eq!(error.code, ErrorCode::E6011);
    assert_eq!(error.message, "Operands must be numbers.");
}

#[test]
fn adding_mixed_types_is_an_error() {
    let error = run_err("1 + nil;");
    assert_eq!(error.code, ErrorCode::E6012);
    assert_eq!(error.message, "Operands must be two numbers or two strings.");
    assert_eq!(error.span, Span::new(2, 3));
}

#[test]
fn reading_an_undefined_variable_is_an_error() {
    let error = run_err("print missing;");
    assert_eq!(error.code, ErrorCode::E6020);
    assert_eq!(error.message, "Undefined variable 'missing'.");
}

#[test]
fn assigning_an_undefined_variable_is_an_error() {
    let error = run_err("missing = 1;");
    assert_eq!(error.code, ErrorCode::E6020);
    assert_eq!(error.message, "Undefined variable 'missing'.");
}

#[test]
fn reading_an_absent_property_is_an_error() {
    let error = run_err("class A {} print A().missing;");
    assert_eq!(error.code, ErrorCode::E6021);
    assert_eq!(error.message, "Undefined property 'missing'.");
}

#[test]
fn property_reads_require_an_instance() {
    let error = run_err("var n = 1; print n.length;");
    assert_eq!(error.code, ErrorCode::E6022);
    assert_eq!(error.message, "Only instances have properties.");
}

#[test]
fn field_writes_require_an_instance() {
    let error = run_err("var n = 1; n.x = 2;");
    assert_eq!(error.code, ErrorCode::E6023);
    assert_eq!(error.message, "Only instances have fields.");
}

#[test]
fn arity_mismatch_is_an_error() {
    let error = run_err("fun f(a) {} f();");
    assert_eq!(error.code, ErrorCode::E6030);
    assert_eq!(error.message, "Expected 1 arguments but got 0.");
    // Reported at the closing paren of the call.
    assert_eq!(error.span, Span::point(14));
}

#[test]
fn only_functions_and_classes_are_callable() {
    let error = run_err("\"str\"();");
    assert_eq!(error.code, ErrorCode::E6032);
    assert_eq!(error.message, "Can only call functions and classes.");
}

#[test]
fn superclass_must_be_a_class() {
    let error = run_err("var NotClass = 1; class Sub < NotClass {}");
    assert_eq!(error.code, ErrorCode::E6033);
    assert_eq!(error.message, "Superclass must be a class.");
}

#[test]
fn execution_stops_at_the_first_runtime_error() {
    let (output, result) = run_capture("print \"before\"; 1 / 0; print \"after\";");
    assert_eq!(output, "before\n");
    let error = result.unwrap_err();
    assert_eq!(error.code, ErrorCode::E6001);
}

#[test]
fn state_persists_across_programs() {
    let interner = StringInterner::new();
    let handler = buffer_handler();
    let mut interpreter = Interpreter::new(&interner, handler.clone());

    for source in ["var a = 1;", "print a;"] {
        let (program, roots) = compile(&interner, source);
        interpreter.interpret(&program, &roots).unwrap();
    }
    assert_eq!(handler.get_output(), "1\n");
}

#[test]
fn functions_survive_their_defining_program() {
    // The function value keeps its own arena alive, so calling it from a
    // later program still finds the body.
    let interner = StringInterner::new();
    let handler = buffer_handler();
    let mut interpreter = Interpreter::new(&interner, handler.clone());

    for source in ["fun greet() { print \"hi\"; }", "greet();"] {
        let (program, roots) = compile(&interner, source);
        interpreter.interpret(&program, &roots).unwrap();
    }
    assert_eq!(handler.get_output(), "hi\n");
}
