//! Integration tests for end-to-end compilation.
//!
//! These tests run source text through the whole pipeline: tokenization, parsing,
//! scope analysis, type checking and TAC generation.

use minic::{
    compile,
    errors::errors::{CompileError, ScopeErrorKind, TypeErrorKind},
    parse_source,
    scope::analyzer::analyze,
    type_checker::type_checker::type_check,
};

fn scope_kinds(source: &str) -> Vec<ScopeErrorKind> {
    let program = parse_source(source, "test.c").unwrap();
    analyze(&program).1.into_iter().map(|error| error.kind).collect()
}

fn type_kinds(source: &str) -> Vec<TypeErrorKind> {
    let program = parse_source(source, "test.c").unwrap();
    type_check(&program).into_iter().map(|error| error.kind).collect()
}

#[test]
fn test_compile_full_program() {
    let source = r#"
        #include <stdio.h>

        enum State { IDLE, RUNNING, DONE };

        int fib(int n);

        int fib(int n) {
            if (n < 2) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }

        void report(int value, string label) {
            print(label, value);
        }

        int main() {
            int state = IDLE;
            int total = 0;
            for (int i = 0; i < 10; i++) {
                total = total + fib(i);
            }
            switch (state) {
                case 0: state = RUNNING; break;
                default: state = DONE;
            }
            report(total, "total");
            return 0;
        }
    "#;

    let tac = compile(source, "fib.c").expect("program should compile");
    let lines = tac.lines();

    assert!(lines.contains(&String::from("function fib begin")));
    assert!(lines.contains(&String::from("n = param")));
    assert!(lines.contains(&String::from("state = 0")));
    assert!(lines.contains(&String::from("call report(total, \"total\")")));
    assert!(lines.contains(&String::from("call print(label, value)")));
    assert_eq!(lines.last().map(String::as_str), Some("function main end"));
}

#[test]
fn test_syntax_error_stops_compilation() {
    match compile("main { int x = ; }", "bad.c") {
        Err(CompileError::Syntax(error)) => assert_eq!(error.get_position().line, 1),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_scope_errors_stop_before_type_checking() {
    // The type error in the initializer is never reported
    match compile("main { int x = \"s\"; y = 1; }", "bad.c") {
        Err(CompileError::Scope(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ScopeErrorKind::UndeclaredVariableAccessed);
        }
        other => panic!("expected scope errors, got {:?}", other),
    }
}

#[test]
fn test_type_errors_stop_before_generation() {
    match compile("main { int n = 1; if (n) { } }", "bad.c") {
        Err(CompileError::Type(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, TypeErrorKind::NonBooleanCondStmt);
        }
        other => panic!("expected type errors, got {:?}", other),
    }
}

#[test]
fn test_clean_program_has_no_scope_errors() {
    assert!(scope_kinds("int g = 1; int twice(int v) { return v * 2; } main { int x = twice(g); { int x = 2; } }").is_empty());
}

#[test]
fn test_use_before_any_declaration_is_forward_reference() {
    assert_eq!(
        scope_kinds("main { counter = 1; } int counter;"),
        vec![ScopeErrorKind::InvalidForwardReference]
    );
}

#[test]
fn test_duplicate_function_definitions() {
    assert_eq!(
        scope_kinds("int f(int a, float b) { return a; } int f(int x, float y) { return x; } main { }"),
        vec![ScopeErrorKind::ConflictingFunctionDefinition]
    );
    assert!(scope_kinds("int f(int a, float b); int f(int x, float y) { return x; } main { }").is_empty());
}

#[test]
fn test_variable_redefinition_rules() {
    assert_eq!(
        scope_kinds("main { int x; int x; }"),
        vec![ScopeErrorKind::VariableRedefinition]
    );
    assert!(scope_kinds("main { { int x; } { int x; } }").is_empty());
}

#[test]
fn test_boolean_conditions() {
    assert!(type_kinds("main { bool b; if (b) { } }").is_empty());
    assert_eq!(
        type_kinds("main { int n; if (n) { } }"),
        vec![TypeErrorKind::NonBooleanCondStmt]
    );
}

#[test]
fn test_missing_return() {
    assert_eq!(
        type_kinds("int f() { int x = 1; } main { }"),
        vec![TypeErrorKind::ReturnStmtNotFound]
    );
    assert!(type_kinds("int f() { int x = 1; return 0; } main { }").is_empty());
}

#[test]
fn test_while_loop_lowering() {
    let tac = compile("main { int x = 0; while (x < 10) { x = x + 1; } }", "loop.c").unwrap();
    let lines = tac.lines();

    let back_edges: Vec<&String> = lines.iter().filter(|line| line.contains("!= 0 goto")).collect();
    assert_eq!(back_edges.len(), 1);
    assert_eq!(lines.iter().filter(|line| line.starts_with("goto ")).count(), 1);

    // The back edge targets the body label, defined before the jump
    let target = back_edges[0].rsplit(' ').next().unwrap();
    let definition = lines.iter().position(|line| *line == format!("{}:", target)).unwrap();
    let jump = lines.iter().position(|line| line == back_edges[0]).unwrap();
    assert!(definition < jump);
}

#[test]
fn test_assignment_lowering() {
    let tac = compile("main { int a; a = 1 + 2 * 3; }", "assign.c").unwrap();
    let lines = tac.lines();

    let temps: Vec<&String> = lines.iter().filter(|line| line.starts_with("t")).collect();
    assert_eq!(temps, vec!["t0 = 2 * 3", "t1 = 1 + t0"]);
    assert!(lines.contains(&String::from("a = t1")));
}
