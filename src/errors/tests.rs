//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{
    CompileError, Error, ErrorImpl, ErrorTip, ScopeError, ScopeErrorKind, TypeError,
    TypeErrorKind,
};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        Position::new(4, 2),
    );

    assert_eq!(error.get_position().line, 4);
    assert_eq!(error.get_position().column, 2);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`}`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_structural_error_names() {
    let error = Error::new(ErrorImpl::InvalidAssignmentTarget, Position::null());
    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");

    let error = Error::new(ErrorImpl::InvalidCallTarget, Position::null());
    assert_eq!(error.get_error_name(), "InvalidCallTarget");

    let error = Error::new(ErrorImpl::UnterminatedBlock, Position::null());
    assert_eq!(error.get_error_name(), "UnterminatedBlock");
}

#[test]
fn test_scope_error_display() {
    let error = ScopeError::new(
        ScopeErrorKind::UndeclaredVariableAccessed,
        "count",
        Position::new(3, 7),
    );

    assert_eq!(
        error.to_string(),
        "Undeclared variable accessed: 'count' at line 3, column 7"
    );
}

#[test]
fn test_type_error_display() {
    let error = TypeError::new(
        TypeErrorKind::NonBooleanCondStmt,
        "condition has type `int`",
        Position::new(2, 5),
    );

    assert_eq!(
        error.to_string(),
        "Non-boolean condition in statement: condition has type `int` (line 2, column 5)"
    );
}

#[test]
fn test_compile_error_from_syntax_error() {
    let error: CompileError =
        Error::new(ErrorImpl::UnterminatedBlock, Position::new(1, 1)).into();

    assert!(matches!(error, CompileError::Syntax(_)));
    assert_eq!(
        error.to_string(),
        "syntax error: unterminated block at line 1, column 1"
    );
}

#[test]
fn test_compile_error_counts() {
    let error = CompileError::Type(vec![
        TypeError::new(TypeErrorKind::ErroneousBreak, "", Position::null()),
        TypeError::new(TypeErrorKind::ReturnStmtNotFound, "", Position::null()),
    ]);

    assert_eq!(error.to_string(), "type checking failed with 2 error(s)");
}
