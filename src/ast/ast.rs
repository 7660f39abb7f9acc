use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BoolExpr, CallExpr, CharExpr, FloatExpr, IntExpr, StringExpr, SymbolExpr,
        UnaryExpr,
    },
    statements::{
        BlockStmt, BreakStmt, DoWhileStmt, EnumDeclStmt, ExpressionStmt, ForStmt,
        FunctionDeclStmt, FunctionProtoStmt, IfStmt, IncludeStmt, MainDeclStmt, PrintStmt,
        ReturnStmt, SwitchStmt, VarDeclStmt, WhileStmt,
    },
};

/// Expression
///
/// Closed set of expression nodes. Every pass matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(IntExpr),
    Float(FloatExpr),
    String(StringExpr),
    Char(CharExpr),
    Bool(BoolExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Int(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Char(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }

    /// Returns the identifier name if this expression is a bare symbol.
    pub fn as_symbol(&self) -> Option<&SymbolExpr> {
        match self {
            Expr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

/// Statement
///
/// Closed set of statement and declaration nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    FunctionProto(FunctionProtoStmt),
    FunctionDecl(FunctionDeclStmt),
    MainDecl(MainDeclStmt),
    EnumDecl(EnumDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Print(PrintStmt),
    Expression(ExpressionStmt),
    Include(IncludeStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FunctionProto(stmt) => &stmt.span,
            Stmt::FunctionDecl(stmt) => &stmt.span,
            Stmt::MainDecl(stmt) => &stmt.span,
            Stmt::EnumDecl(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::DoWhile(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Switch(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Include(stmt) => &stmt.span,
        }
    }
}

/// Root of a parsed translation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}
