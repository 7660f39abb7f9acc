//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable, function, prototype and enum declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use super::parser::parse;
use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryOp, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.c".to_string()))?;
    parse(tokens)
}

fn main_body(program: &Program) -> &Vec<Stmt> {
    match program.body.last() {
        Some(Stmt::MainDecl(main)) => &main.body.body,
        other => panic!("expected main declaration, got {:?}", other),
    }
}

fn first_expression(source: &str) -> Expr {
    let program = parse_source(&format!("main {{ {} }}", source)).unwrap();
    match &main_body(&program)[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("int x = 42; float y;").unwrap();

    match &program.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.ty, Type::Int);
            assert_eq!(decl.name, "x");
            assert!(matches!(decl.initializer, Some(Expr::Int(ref int)) if int.value == 42));
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }

    match &program.body[1] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.ty, Type::Float);
            assert!(decl.initializer.is_none());
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source("int add(int a, float b) { return a; }").unwrap();

    match &program.body[0] {
        Stmt::FunctionDecl(function) => {
            assert_eq!(function.return_type, Type::Int);
            assert_eq!(function.name, "add");
            assert_eq!(function.params.len(), 2);
            assert_eq!(function.params[1].ty, Type::Float);
            assert_eq!(function.params[1].name, "b");
            assert!(matches!(function.body.body[0], Stmt::Return(_)));
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_prototype() {
    let program = parse_source("void log_value(int v); int zero(void);").unwrap();

    assert!(matches!(&program.body[0], Stmt::FunctionProto(proto) if proto.name == "log_value" && proto.params.len() == 1));
    assert!(matches!(&program.body[1], Stmt::FunctionProto(proto) if proto.params.is_empty()));
}

#[test]
fn test_parse_main_forms() {
    let program = parse_source("main { }").unwrap();
    assert!(matches!(program.body[0], Stmt::MainDecl(_)));

    let program = parse_source("int main() { return 0; }").unwrap();
    assert!(matches!(program.body[0], Stmt::MainDecl(_)));
}

#[test]
fn test_parse_enum_declaration() {
    let program = parse_source("enum Color { RED, GREEN, BLUE };").unwrap();

    match &program.body[0] {
        Stmt::EnumDecl(decl) => {
            assert_eq!(decl.name, "Color");
            let names: Vec<&str> = decl.values.values.iter().map(|value| value.name.as_str()).collect();
            assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
        }
        other => panic!("expected enum declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_include() {
    let program = parse_source("#include <stdio.h>\nmain { }").unwrap();

    assert!(matches!(&program.body[0], Stmt::Include(include) if include.header == "stdio.h"));
}

#[test]
fn test_parse_precedence() {
    // a = 1 + 2 * 3 parses as a = (1 + (2 * 3))
    let expr = first_expression("a = 1 + 2 * 3;");

    let Expr::Binary(assign) = expr else {
        panic!("expected assignment");
    };
    assert_eq!(assign.op, BinaryOp::Assign);

    let Expr::Binary(add) = *assign.right else {
        panic!("expected addition");
    };
    assert_eq!(add.op, BinaryOp::Add);
    assert!(matches!(*add.right, Expr::Binary(ref mul) if mul.op == BinaryOp::Multiply));
}

#[test]
fn test_parse_logical_precedence() {
    // a || b && c parses as a || (b && c)
    let expr = first_expression("a || b && c;");

    let Expr::Binary(or) = expr else {
        panic!("expected binary expression");
    };
    assert_eq!(or.op, BinaryOp::Or);
    assert!(matches!(*or.right, Expr::Binary(ref and) if and.op == BinaryOp::And));
}

#[test]
fn test_parse_left_associativity() {
    // a - b - c parses as (a - b) - c
    let expr = first_expression("a - b - c;");

    let Expr::Binary(outer) = expr else {
        panic!("expected binary expression");
    };
    assert!(matches!(*outer.left, Expr::Binary(ref inner) if inner.op == BinaryOp::Subtract));
    assert!(matches!(*outer.right, Expr::Symbol(ref symbol) if symbol.value == "c"));
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let expr = first_expression("a = b = 1;");

    let Expr::Binary(outer) = expr else {
        panic!("expected assignment");
    };
    assert!(matches!(*outer.left, Expr::Symbol(ref symbol) if symbol.value == "a"));
    assert!(matches!(*outer.right, Expr::Binary(ref inner) if inner.op == BinaryOp::Assign));
}

#[test]
fn test_parse_unary_and_postfix() {
    let expr = first_expression("-x * 2;");
    let Expr::Binary(mul) = expr else {
        panic!("expected multiplication");
    };
    assert!(matches!(*mul.left, Expr::Unary(ref unary) if unary.op == UnaryOp::Negate && !unary.is_postfix));

    let expr = first_expression("i++;");
    assert!(matches!(expr, Expr::Unary(ref unary) if unary.op == UnaryOp::Increment && unary.is_postfix));

    let expr = first_expression("--i;");
    assert!(matches!(expr, Expr::Unary(ref unary) if unary.op == UnaryOp::Decrement && !unary.is_postfix));
}

#[test]
fn test_parse_call_expression() {
    let expr = first_expression("sum(1, x + 2);");

    let Expr::Call(call) = expr else {
        panic!("expected call");
    };
    assert_eq!(call.callee.value, "sum");
    assert_eq!(call.arguments.len(), 2);
}

#[test]
fn test_parse_grouping() {
    let expr = first_expression("(1 + 2) * 3;");

    let Expr::Binary(mul) = expr else {
        panic!("expected multiplication");
    };
    assert_eq!(mul.op, BinaryOp::Multiply);
    assert!(matches!(*mul.left, Expr::Binary(ref add) if add.op == BinaryOp::Add));
}

#[test]
fn test_parse_if_else_statement() {
    let program = parse_source("main { if (x > 0) { print(x); } else y = 1; }").unwrap();

    match &main_body(&program)[0] {
        Stmt::If(stmt) => {
            assert_eq!(stmt.if_body.body.len(), 1);
            let else_body = stmt.else_body.as_ref().expect("else body");
            assert!(matches!(else_body.body[0], Stmt::Expression(_)));
        }
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_loops() {
    let program = parse_source(
        "main { while (x < 10) { x = x + 1; } do { x--; } while (x > 0); for (int i = 0; i < 3; i++) { } for (;;) { break; } }",
    )
    .unwrap();
    let body = main_body(&program);

    assert!(matches!(body[0], Stmt::While(_)));
    assert!(matches!(body[1], Stmt::DoWhile(_)));

    match &body[2] {
        Stmt::For(stmt) => {
            assert!(matches!(stmt.init.as_deref(), Some(Stmt::VarDecl(_))));
            assert!(stmt.condition.is_some());
            assert!(stmt.update.is_some());
        }
        other => panic!("expected for statement, got {:?}", other),
    }

    match &body[3] {
        Stmt::For(stmt) => {
            assert!(stmt.init.is_none());
            assert!(stmt.condition.is_none());
            assert!(stmt.update.is_none());
        }
        other => panic!("expected for statement, got {:?}", other),
    }
}

#[test]
fn test_parse_switch_statement() {
    let program = parse_source(
        "main { switch (x) { case 1: y = 1; break; case 2 { y = 2; } default: y = 0; } }",
    )
    .unwrap();

    match &main_body(&program)[0] {
        Stmt::Switch(stmt) => {
            assert_eq!(stmt.cases.len(), 2);
            assert_eq!(stmt.cases[0].body.body.len(), 2);
            assert_eq!(stmt.cases[1].body.body.len(), 1);
            assert_eq!(stmt.default_body.as_ref().map(|body| body.body.len()), Some(1));
        }
        other => panic!("expected switch statement, got {:?}", other),
    }
}

#[test]
fn test_parse_statement_positions() {
    let program = parse_source("main {\n  int x;\n}").unwrap();

    let stmt = &main_body(&program)[0];
    assert_eq!(stmt.get_span().start.line, 2);
    assert_eq!(stmt.get_span().start.column, 3);
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("main { int x = 1 }").unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_unterminated_block() {
    let error = parse_source("main { int x;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedBlock");
}

#[test]
fn test_parse_invalid_assignment_target() {
    let error = parse_source("main { 1 = x; }").unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
}

#[test]
fn test_parse_invalid_call_target() {
    let error = parse_source("main { (a + b)(1); }").unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidCallTarget");
}
