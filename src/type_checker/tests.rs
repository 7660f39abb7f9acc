use super::type_checker::type_check;
use crate::{
    errors::errors::{TypeError, TypeErrorKind},
    parse_source, Position,
};

fn type_errors(source: &str) -> Vec<TypeError> {
    let program = parse_source(source, "test.c").unwrap();
    type_check(&program)
}

fn kinds(source: &str) -> Vec<TypeErrorKind> {
    type_errors(source).into_iter().map(|error| error.kind).collect()
}

#[test]
fn test_valid_program() {
    let source = r#"
        enum Color { RED, GREEN };
        float scale(float value, int factor) { return value * factor; }
        void report(int value) { print(value); }
        main {
            int count = 0;
            double total = 0.5;
            bool done = false;
            while (!done) {
                count++;
                total = total + scale(1.5, count);
                if (count >= 10 || total > 100.0) { done = true; }
            }
            int mask = (count & 3) | (1 << 2);
            switch (count % 4) {
                case 0: report(GREEN); break;
                default: report(mask);
            }
        }
    "#;

    assert_eq!(type_errors(source), vec![]);
}

#[test]
fn test_numeric_widening_in_declarations() {
    assert!(kinds("main { float f = 1; double d = f + 2; int i = 2.5; }").is_empty());
}

#[test]
fn test_erroneous_var_decl() {
    assert_eq!(
        kinds("main { int x = \"text\"; }"),
        vec![TypeErrorKind::ErroneousVarDecl]
    );
    assert_eq!(kinds("main { void v; }"), vec![TypeErrorKind::ErroneousVarDecl]);
}

#[test]
fn test_assignment_mismatch() {
    let errors = type_errors("main { bool b; b = 'c'; }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TypeErrorKind::ExpressionTypeMismatch);
    assert_eq!(errors[0].position, Position::new(1, 16));
}

#[test]
fn test_arithmetic_on_non_numeric() {
    assert_eq!(
        kinds("main { string s = \"a\"; int x = s + 1; }"),
        vec![TypeErrorKind::AttemptedAddOpOnNonNumeric]
    );
    assert_eq!(
        kinds("main { bool b = -true; }"),
        vec![TypeErrorKind::AttemptedAddOpOnNonNumeric]
    );
}

#[test]
fn test_modulo_requires_integers() {
    assert_eq!(
        kinds("main { float f = 1.5 % 2; }"),
        vec![TypeErrorKind::ExpressionTypeMismatch]
    );
}

#[test]
fn test_logical_bitwise_and_shift_operands() {
    assert_eq!(
        kinds("main { bool b = 1 && true; }"),
        vec![TypeErrorKind::AttemptedBoolOpOnNonBools]
    );
    assert_eq!(
        kinds("main { int x = 1.5 & 2; }"),
        vec![TypeErrorKind::AttemptedBitOpOnNonInt]
    );
    assert_eq!(
        kinds("main { int x = 1 << 'c'; }"),
        vec![TypeErrorKind::AttemptedShiftOnNonInt]
    );
    assert_eq!(
        kinds("main { bool b = !3; }"),
        vec![TypeErrorKind::ExpectedBooleanExpression]
    );
}

#[test]
fn test_comparison_yields_bool() {
    assert!(kinds("main { bool b = 1 < 2.5; bool c = 'a' == 'b'; }").is_empty());
    assert_eq!(
        kinds("main { bool b = 1 == \"one\"; }"),
        vec![TypeErrorKind::ExpressionTypeMismatch]
    );
}

#[test]
fn test_errors_do_not_cascade() {
    // Only the innermost failure is reported
    assert_eq!(
        kinds("main { int x = (\"a\" + 1) * 2 + 3; }"),
        vec![TypeErrorKind::AttemptedAddOpOnNonNumeric]
    );
}

#[test]
fn test_non_boolean_conditions() {
    let errors = type_errors("main {\n  int x = 1;\n  while (x) { }\n}");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TypeErrorKind::NonBooleanCondStmt);
    assert_eq!(errors[0].position, Position::new(3, 3));

    assert_eq!(
        kinds("main { if (1) { } do { } while (2.0); for (; 'c'; ) { } }"),
        vec![
            TypeErrorKind::NonBooleanCondStmt,
            TypeErrorKind::NonBooleanCondStmt,
            TypeErrorKind::NonBooleanCondStmt,
        ]
    );
}

#[test]
fn test_void_used_as_value() {
    assert_eq!(
        kinds("void f() { } main { int x = f(); }"),
        vec![TypeErrorKind::EmptyExpression]
    );
    assert_eq!(
        kinds("void f() { } main { if (f()) { } }"),
        vec![TypeErrorKind::EmptyExpression]
    );
    assert!(kinds("void f() { } main { f(); }").is_empty());
}

#[test]
fn test_call_argument_count() {
    assert_eq!(
        kinds("int add(int a, int b) { return a + b; } main { add(1); }"),
        vec![TypeErrorKind::FnCallParamCount]
    );
}

#[test]
fn test_call_argument_type() {
    let errors = type_errors("int add(int a, int b) { return a + b; } main { add(1, \"two\"); }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TypeErrorKind::FnCallParamType);
    assert!(errors[0].message.contains("argument 2"));
}

#[test]
fn test_overload_resolution_uses_argument_types() {
    let source = r#"
        int pick(int v) { return v; }
        string pick(string v) { return v; }
        main {
            int i = pick(1);
            string s = pick("one");
        }
    "#;

    assert!(kinds(source).is_empty());
    assert_eq!(
        kinds("int pick(int v) { return v; } string pick(string v) { return v; } main { int i = pick(\"one\"); }"),
        vec![TypeErrorKind::ErroneousVarDecl]
    );
}

#[test]
fn test_return_rules() {
    assert_eq!(
        kinds("int f() { return \"x\"; } main { }"),
        vec![TypeErrorKind::ErroneousReturnType]
    );
    assert_eq!(
        kinds("void f() { return 1; } main { }"),
        vec![TypeErrorKind::ErroneousReturnType]
    );
    assert_eq!(
        kinds("int f() { return; } main { }"),
        vec![
            TypeErrorKind::ErroneousReturnType,
            TypeErrorKind::ReturnStmtNotFound,
        ]
    );
    assert_eq!(
        kinds("int f(int a) { a = a + 1; } main { }"),
        vec![TypeErrorKind::ReturnStmtNotFound]
    );
}

#[test]
fn test_main_return_is_optional() {
    assert!(kinds("main { }").is_empty());
    assert!(kinds("int main() { return 0; }").is_empty());
    assert_eq!(
        kinds("main { return; }"),
        vec![TypeErrorKind::ErroneousReturnType]
    );
}

#[test]
fn test_break_placement() {
    assert!(kinds("main { while (true) { if (true) { break; } } switch (1) { case 1: break; } }").is_empty());
    assert_eq!(kinds("main { break; }"), vec![TypeErrorKind::ErroneousBreak]);
    assert_eq!(
        kinds("void f() { break; } main { while (true) { f(); } }"),
        vec![TypeErrorKind::ErroneousBreak]
    );
}

#[test]
fn test_switch_types() {
    assert!(kinds("main { char c = 'a'; switch (c) { case 'a': break; } }").is_empty());
    assert_eq!(
        kinds("main { switch (1.5) { default: break; } }"),
        vec![TypeErrorKind::ExpressionTypeMismatch]
    );
    assert_eq!(
        kinds("main { switch (1) { case 'a': break; } }"),
        vec![TypeErrorKind::ExpressionTypeMismatch]
    );
}

#[test]
fn test_case_values_are_not_widened() {
    // int and float are compatible elsewhere, but case labels must match exactly
    let errors = type_errors("main { int n = 2; switch (n) { case 1: break; case 2.0: break; } }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TypeErrorKind::ExpressionTypeMismatch);
    assert!(errors[0].message.contains("`float`"));
}

#[test]
fn test_shadowed_variable_uses_inner_type() {
    assert_eq!(
        kinds("int x; main { string x = \"s\"; x = 1; }"),
        vec![TypeErrorKind::ExpressionTypeMismatch]
    );
}

#[test]
fn test_return_outside_function() {
    let errors = type_errors("return 1;\nmain { }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TypeErrorKind::ErroneousReturnType);
    assert_eq!(errors[0].position, Position::new(1, 1));
}
