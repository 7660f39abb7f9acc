use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal front-end (lexing or parsing) error.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnterminatedBlock => "UnterminatedBlock",
            ErrorImpl::InvalidCallTarget => "InvalidCallTarget",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnterminatedBlock => {
                ErrorTip::Suggestion(String::from("Reached end of file inside a block, missing `}`?"))
            }
            ErrorImpl::InvalidCallTarget => {
                ErrorTip::Suggestion(String::from("Only named functions can be called"))
            }
            ErrorImpl::InvalidAssignmentTarget => {
                ErrorTip::Suggestion(String::from("Only variables can be assigned to"))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unterminated block")]
    UnterminatedBlock,
    #[error("call target is not an identifier")]
    InvalidCallTarget,
    #[error("assignment target is not an identifier")]
    InvalidAssignmentTarget,
}

/// Name-resolution violations reported by the scope analyzer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeErrorKind {
    #[error("Undeclared variable accessed")]
    UndeclaredVariableAccessed,
    #[error("Undefined function called")]
    UndefinedFunctionCalled,
    #[error("Variable redefinition")]
    VariableRedefinition,
    #[error("Function prototype redefinition")]
    FunctionPrototypeRedefinition,
    #[error("Conflicting function definition")]
    ConflictingFunctionDefinition,
    #[error("Conflicting declaration")]
    ConflictingDeclaration,
    #[error("Parameter redefinition")]
    ParameterRedefinition,
    #[error("Invalid forward reference")]
    InvalidForwardReference,
    #[error("Invalid storage class usage for")]
    InvalidStorageClassUsage,
    #[error("Enum redefinition")]
    EnumRedefinition,
    #[error("Enum variant redefinition")]
    EnumVariantRedefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeError {
    pub kind: ScopeErrorKind,
    pub name: String,
    pub position: Position,
}

impl ScopeError {
    pub fn new(kind: ScopeErrorKind, name: impl Into<String>, position: Position) -> Self {
        ScopeError {
            kind,
            name: name.into(),
            position,
        }
    }
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' at {}", self.kind, self.name, self.position)
    }
}

/// Static type violations reported by the type checker.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    #[error("Erroneous variable declaration")]
    ErroneousVarDecl,
    #[error("Function call parameter count mismatch")]
    FnCallParamCount,
    #[error("Function call parameter type mismatch")]
    FnCallParamType,
    #[error("Function return type mismatch")]
    ErroneousReturnType,
    #[error("Expression type mismatch")]
    ExpressionTypeMismatch,
    #[error("Expected boolean expression")]
    ExpectedBooleanExpression,
    #[error("Break statement outside loop or switch")]
    ErroneousBreak,
    #[error("Non-boolean condition in statement")]
    NonBooleanCondStmt,
    #[error("Expression has no value")]
    EmptyExpression,
    #[error("Attempted boolean operation on non-boolean types")]
    AttemptedBoolOpOnNonBools,
    #[error("Attempted bitwise operation on non-integer type")]
    AttemptedBitOpOnNonInt,
    #[error("Attempted shift operation on non-integer type")]
    AttemptedShiftOnNonInt,
    #[error("Attempted arithmetic on non-numeric type")]
    AttemptedAddOpOnNonNumeric,
    #[error("Return statement not found where required")]
    ReturnStmtNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub message: String,
    pub position: Position,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, message: impl Into<String>, position: Position) -> Self {
        TypeError {
            kind,
            message: message.into(),
            position,
        }
    }
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.message, self.position)
    }
}

/// Why a whole compilation stopped before producing TAC.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("syntax error: {0}")]
    Syntax(#[from] Error),
    #[error("scope analysis failed with {} error(s)", .0.len())]
    Scope(Vec<ScopeError>),
    #[error("type checking failed with {} error(s)", .0.len())]
    Type(Vec<TypeError>),
}
