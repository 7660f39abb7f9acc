/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Expr`/`Stmt` sum types and the `Program` root
/// - expressions: Expression node payloads and operators
/// - statements: Statement and declaration node payloads
/// - types: The primitive type model and its compatibility rules
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
