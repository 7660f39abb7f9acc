use std::mem;

use log::debug;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, BinaryOp, CallExpr, OperatorClass, UnaryExpr, UnaryOp},
        statements::{
            param_types, BlockStmt, EnumDeclStmt, FunctionDeclStmt, FunctionProtoStmt,
            MainDeclStmt, ReturnStmt, SwitchStmt, VarDeclStmt,
        },
        types::Type,
    },
    errors::errors::{TypeError, TypeErrorKind},
    scope::scope_table::{ScopeTable, SymbolInfo},
    Position,
};

/// The function whose body is currently being checked.
#[derive(Debug)]
struct FunctionContext {
    name: String,
    return_type: Type,
    is_main: bool,
    has_value_return: bool,
}

/// Static type checker.
///
/// Walks the program once in source order, rebuilding its own scope tree with the
/// same scope-opening rules as the scope analyzer. Expressions are typed bottom-up
/// by [`TypeChecker::type_of`]; an operand that already failed to type is `Type::Error`
/// and silences any follow-up complaint about the expression that contains it.
#[derive(Debug)]
pub struct TypeChecker {
    table: ScopeTable,
    errors: Vec<TypeError>,
    function: Option<FunctionContext>,
    /// Number of loops and switches enclosing the current statement.
    breakable_depth: u32,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Type checks a whole program and returns every type error found, in source order.
pub fn type_check(program: &Program) -> Vec<TypeError> {
    let mut checker = TypeChecker::new();

    for stmt in &program.body {
        checker.check_stmt(stmt);
    }

    debug!("type checking finished with {} error(s)", checker.errors.len());
    checker.errors
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            table: ScopeTable::new(),
            errors: vec![],
            function: None,
            breakable_depth: 0,
        }
    }

    fn error(&mut self, kind: TypeErrorKind, message: impl Into<String>, position: Position) {
        let error = TypeError::new(kind, message, position);
        debug!("type error: {}", error);
        self.errors.push(error);
    }

    // STATEMENTS

    pub fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.check_var_decl(decl),
            Stmt::FunctionProto(proto) => self.check_function_proto(proto),
            Stmt::FunctionDecl(function) => self.check_function_decl(function),
            Stmt::MainDecl(main) => self.check_main_decl(main),
            Stmt::EnumDecl(decl) => self.check_enum_decl(decl),
            Stmt::Block(block) => self.check_block(block),
            Stmt::If(stmt) => {
                self.check_condition(&stmt.condition, "if", stmt.span.start);
                self.check_block(&stmt.if_body);
                if let Some(else_body) = &stmt.else_body {
                    self.check_block(else_body);
                }
            }
            Stmt::While(stmt) => {
                self.check_condition(&stmt.condition, "while", stmt.span.start);
                self.check_breakable_block(&stmt.body);
            }
            Stmt::DoWhile(stmt) => {
                self.check_breakable_block(&stmt.body);
                self.check_condition(&stmt.condition, "do-while", stmt.span.start);
            }
            Stmt::For(stmt) => {
                self.table.enter_scope();
                if let Some(init) = &stmt.init {
                    self.check_stmt(init);
                }
                if let Some(condition) = &stmt.condition {
                    self.check_condition(condition, "for", stmt.span.start);
                }
                if let Some(update) = &stmt.update {
                    self.type_of(update);
                }
                self.check_breakable_block(&stmt.body);
                self.table.exit_scope();
            }
            Stmt::Switch(stmt) => self.check_switch(stmt),
            Stmt::Return(stmt) => self.check_return(stmt),
            Stmt::Break(stmt) => {
                if self.breakable_depth == 0 {
                    self.error(
                        TypeErrorKind::ErroneousBreak,
                        "`break` is only allowed inside a loop or switch",
                        stmt.span.start,
                    );
                }
            }
            Stmt::Print(stmt) => {
                for argument in &stmt.arguments {
                    self.value_type(argument);
                }
            }
            Stmt::Expression(stmt) => {
                self.type_of(&stmt.expression);
            }
            Stmt::Include(_) => {}
        }
    }

    fn check_block(&mut self, block: &BlockStmt) {
        self.table.enter_scope();
        for stmt in &block.body {
            self.check_stmt(stmt);
        }
        self.table.exit_scope();
    }

    fn check_breakable_block(&mut self, block: &BlockStmt) {
        self.breakable_depth += 1;
        self.check_block(block);
        self.breakable_depth -= 1;
    }

    fn check_condition(&mut self, condition: &Expr, construct: &str, position: Position) {
        let ty = self.type_of(condition);

        match ty {
            Type::Bool | Type::Error => {}
            Type::Void => self.error(
                TypeErrorKind::EmptyExpression,
                format!("`{}` condition has no value", construct),
                position,
            ),
            other => self.error(
                TypeErrorKind::NonBooleanCondStmt,
                format!("`{}` condition has type `{}`, expected `bool`", construct, other),
                position,
            ),
        }
    }

    fn check_var_decl(&mut self, decl: &VarDeclStmt) {
        let position = decl.span.start;

        if decl.ty == Type::Void {
            self.error(
                TypeErrorKind::ErroneousVarDecl,
                format!("variable '{}' declared `void`", decl.name),
                position,
            );
        }

        if let Some(initializer) = &decl.initializer {
            let value = self.value_type(initializer);
            if decl.ty != Type::Void && !decl.ty.is_compatible_with(&value) {
                self.error(
                    TypeErrorKind::ErroneousVarDecl,
                    format!(
                        "cannot initialize `{}` variable '{}' with a `{}` value",
                        decl.ty, decl.name, value
                    ),
                    position,
                );
            }
        }

        self.table
            .declare(SymbolInfo::variable(&decl.name, decl.ty, position));
    }

    fn declare_function(&mut self, name: &str, return_type: Type, params: Vec<Type>, position: Position) {
        if self.table.lookup_local_function_mut(name, &params).is_some() {
            return;
        }

        self.table
            .declare(SymbolInfo::function(name, return_type, params, false, position));
    }

    fn check_function_proto(&mut self, proto: &FunctionProtoStmt) {
        self.declare_function(
            &proto.name,
            proto.return_type,
            param_types(&proto.params),
            proto.span.start,
        );
    }

    fn check_function_decl(&mut self, function: &FunctionDeclStmt) {
        let position = function.span.start;
        self.declare_function(
            &function.name,
            function.return_type,
            param_types(&function.params),
            position,
        );

        self.table.enter_scope();
        for param in &function.params {
            self.table
                .declare(SymbolInfo::variable(&param.name, param.ty, param.span.start));
        }

        let context = FunctionContext {
            name: function.name.clone(),
            return_type: function.return_type,
            is_main: false,
            has_value_return: false,
        };
        let context = self.check_function_body(context, &function.body);

        if context.return_type != Type::Void && !context.has_value_return {
            self.error(
                TypeErrorKind::ReturnStmtNotFound,
                format!(
                    "function '{}' returns `{}` but never returns a value",
                    context.name, context.return_type
                ),
                position,
            );
        }

        self.table.exit_scope();
    }

    /// `main` returns `int` implicitly and may fall off its end.
    fn check_main_decl(&mut self, main: &MainDeclStmt) {
        self.declare_function("main", Type::Int, vec![], main.span.start);

        self.table.enter_scope();
        let context = FunctionContext {
            name: String::from("main"),
            return_type: Type::Int,
            is_main: true,
            has_value_return: false,
        };
        self.check_function_body(context, &main.body);
        self.table.exit_scope();
    }

    /// Checks body statements in the already-entered function frame and hands the
    /// finished context back.
    fn check_function_body(&mut self, context: FunctionContext, body: &BlockStmt) -> FunctionContext {
        let outer_function = self.function.replace(context);
        let outer_depth = mem::take(&mut self.breakable_depth);

        for stmt in &body.body {
            self.check_stmt(stmt);
        }

        self.breakable_depth = outer_depth;
        let finished = mem::replace(&mut self.function, outer_function);

        finished.unwrap_or(FunctionContext {
            name: String::new(),
            return_type: Type::Void,
            is_main: false,
            has_value_return: false,
        })
    }

    fn check_enum_decl(&mut self, decl: &EnumDeclStmt) {
        if self.table.current_level() > 0 {
            return;
        }

        self.table
            .declare(SymbolInfo::enumeration(&decl.name, decl.span.start));
        for value in &decl.values.values {
            if self.table.lookup(&value.name).is_none() {
                self.table
                    .declare(SymbolInfo::enum_value(&value.name, value.span.start));
            }
        }
    }

    fn check_switch(&mut self, stmt: &SwitchStmt) {
        let subject = self.value_type(&stmt.expression);

        if !subject.is_error() && !matches!(subject, Type::Int | Type::Char) {
            self.error(
                TypeErrorKind::ExpressionTypeMismatch,
                format!("switch expression must be `int` or `char`, found `{}`", subject),
                stmt.expression.get_span().start,
            );
        }

        self.breakable_depth += 1;
        for case in &stmt.cases {
            let value = self.value_type(&case.value);
            if !subject.is_error() && !value.is_error() && value != subject {
                self.error(
                    TypeErrorKind::ExpressionTypeMismatch,
                    format!(
                        "case value of type `{}` does not match switch type `{}`",
                        value, subject
                    ),
                    case.value.get_span().start,
                );
            }
            self.check_block(&case.body);
        }

        if let Some(default_body) = &stmt.default_body {
            self.check_block(default_body);
        }
        self.breakable_depth -= 1;
    }

    fn check_return(&mut self, stmt: &ReturnStmt) {
        let position = stmt.span.start;
        let value = stmt.value.as_ref().map(|value| self.value_type(value));

        let Some(function) = self.function.as_mut() else {
            self.error(
                TypeErrorKind::ErroneousReturnType,
                "`return` outside of a function",
                position,
            );
            return;
        };

        let name = function.name.clone();
        let expected = function.return_type;

        let message = match value {
            Some(_) if expected == Type::Void => {
                Some(format!("void function '{}' cannot return a value", name))
            }
            Some(found) => {
                function.has_value_return = true;
                if expected.is_compatible_with(&found) {
                    None
                } else {
                    Some(format!(
                        "function '{}' returns `{}`, found `{}`",
                        name, expected, found
                    ))
                }
            }
            None if expected != Type::Void => {
                let subject = if function.is_main {
                    String::from("`main`")
                } else {
                    format!("function '{}'", name)
                };
                Some(format!("{} must return a `{}` value", subject, expected))
            }
            None => None,
        };

        if let Some(message) = message {
            self.error(TypeErrorKind::ErroneousReturnType, message, position);
        }
    }

    // EXPRESSIONS

    /// Types an expression that must produce a value. A `void` result is reported
    /// and becomes `Type::Error`.
    pub fn value_type(&mut self, expr: &Expr) -> Type {
        let ty = self.type_of(expr);
        if ty == Type::Void {
            self.error(
                TypeErrorKind::EmptyExpression,
                "a `void` expression is used as a value",
                expr.get_span().start,
            );
            return Type::Error;
        }

        ty
    }

    pub fn type_of(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Int(_) => Type::Int,
            Expr::Float(_) => Type::Float,
            Expr::String(_) => Type::String,
            Expr::Char(_) => Type::Char,
            Expr::Bool(_) => Type::Bool,
            Expr::Symbol(symbol) => {
                let resolved = self
                    .table
                    .lookup(&symbol.value)
                    .map(|found| (found.is_function(), found.ty));

                match resolved {
                    // Unresolved names were already reported by the scope analyzer
                    None => Type::Error,
                    Some((true, _)) => {
                        let message = format!("function '{}' is used as a value", symbol.value);
                        self.error(TypeErrorKind::ExpressionTypeMismatch, message, symbol.span.start);
                        Type::Error
                    }
                    Some((false, ty)) => ty,
                }
            }
            Expr::Binary(binary) => self.type_of_binary(binary),
            Expr::Unary(unary) => self.type_of_unary(unary),
            Expr::Call(call) => self.type_of_call(call),
        }
    }

    fn type_of_binary(&mut self, binary: &BinaryExpr) -> Type {
        let position = binary.span.start;

        if binary.op == BinaryOp::Assign {
            return self.type_of_assignment(binary);
        }

        let left = self.value_type(&binary.left);
        let right = self.value_type(&binary.right);
        let op = binary.op;

        match op.class() {
            OperatorClass::Logical => {
                if !left.is_error() && !right.is_error() && (left != Type::Bool || right != Type::Bool) {
                    self.error(
                        TypeErrorKind::AttemptedBoolOpOnNonBools,
                        format!("`{}` needs `bool` operands, found `{}` and `{}`", op, left, right),
                        position,
                    );
                }
                Type::Bool
            }
            OperatorClass::Comparison => {
                let comparable = left == right || (left.is_numeric() && right.is_numeric());
                if !left.is_error() && !right.is_error() && !comparable {
                    self.error(
                        TypeErrorKind::ExpressionTypeMismatch,
                        format!("cannot compare `{}` with `{}` using `{}`", left, right, op),
                        position,
                    );
                }
                Type::Bool
            }
            OperatorClass::Bitwise | OperatorClass::Shift => {
                if left.is_error() || right.is_error() {
                    return Type::Error;
                }
                if !left.is_integer() || !right.is_integer() {
                    let kind = if op.class() == OperatorClass::Shift {
                        TypeErrorKind::AttemptedShiftOnNonInt
                    } else {
                        TypeErrorKind::AttemptedBitOpOnNonInt
                    };
                    self.error(
                        kind,
                        format!("`{}` needs `int` operands, found `{}` and `{}`", op, left, right),
                        position,
                    );
                    return Type::Error;
                }
                Type::Int
            }
            OperatorClass::Arithmetic => {
                if left.is_error() || right.is_error() {
                    return Type::Error;
                }
                if !left.is_numeric() || !right.is_numeric() {
                    self.error(
                        TypeErrorKind::AttemptedAddOpOnNonNumeric,
                        format!("`{}` needs numeric operands, found `{}` and `{}`", op, left, right),
                        position,
                    );
                    return Type::Error;
                }
                Type::widest(left, right)
            }
            OperatorClass::Modulo => {
                if left.is_error() || right.is_error() {
                    return Type::Error;
                }
                if !left.is_numeric() || !right.is_numeric() {
                    self.error(
                        TypeErrorKind::AttemptedAddOpOnNonNumeric,
                        format!("`%` needs numeric operands, found `{}` and `{}`", left, right),
                        position,
                    );
                    return Type::Error;
                }
                if !left.is_integer() || !right.is_integer() {
                    self.error(
                        TypeErrorKind::ExpressionTypeMismatch,
                        format!("`%` needs `int` operands, found `{}` and `{}`", left, right),
                        position,
                    );
                    return Type::Error;
                }
                Type::Int
            }
            OperatorClass::Assignment => Type::Error,
        }
    }

    fn type_of_assignment(&mut self, binary: &BinaryExpr) -> Type {
        let position = binary.span.start;
        let value = self.value_type(&binary.right);

        let Some(target) = binary.left.as_symbol() else {
            self.error(
                TypeErrorKind::ExpressionTypeMismatch,
                "assignment target is not a variable",
                position,
            );
            return Type::Error;
        };

        let Some((is_variable, target_type)) = self
            .table
            .lookup(&target.value)
            .map(|symbol| (symbol.is_variable(), symbol.ty))
        else {
            return Type::Error;
        };

        if !is_variable {
            let message = format!("cannot assign to '{}', it is not a variable", target.value);
            self.error(TypeErrorKind::ExpressionTypeMismatch, message, position);
            return Type::Error;
        }

        if !target_type.is_compatible_with(&value) {
            self.error(
                TypeErrorKind::ExpressionTypeMismatch,
                format!(
                    "cannot assign a `{}` value to '{}' of type `{}`",
                    value, target.value, target_type
                ),
                position,
            );
        }

        target_type
    }

    fn type_of_unary(&mut self, unary: &UnaryExpr) -> Type {
        let position = unary.span.start;
        let operand = self.value_type(&unary.operand);

        match unary.op {
            UnaryOp::Not => {
                if !operand.is_error() && operand != Type::Bool {
                    self.error(
                        TypeErrorKind::ExpectedBooleanExpression,
                        format!("`!` needs a `bool` operand, found `{}`", operand),
                        position,
                    );
                }
                Type::Bool
            }
            UnaryOp::Negate | UnaryOp::Plus | UnaryOp::Increment | UnaryOp::Decrement => {
                if operand.is_error() {
                    return Type::Error;
                }
                if !operand.is_numeric() {
                    self.error(
                        TypeErrorKind::AttemptedAddOpOnNonNumeric,
                        format!("`{}` needs a numeric operand, found `{}`", unary.op, operand),
                        position,
                    );
                    return Type::Error;
                }
                if matches!(unary.op, UnaryOp::Increment | UnaryOp::Decrement)
                    && unary.operand.as_symbol().is_none()
                {
                    self.error(
                        TypeErrorKind::ExpressionTypeMismatch,
                        format!("operand of `{}` must be a variable", unary.op),
                        position,
                    );
                }
                operand
            }
        }
    }

    /// Resolves the overload whose parameters accept the argument types, preferring an
    /// exact match. Falls back to reporting against the closest candidate.
    fn type_of_call(&mut self, call: &CallExpr) -> Type {
        let name = &call.callee.value;
        let position = call.span.start;
        let arguments: Vec<Type> = call
            .arguments
            .iter()
            .map(|argument| self.value_type(argument))
            .collect();

        let candidates: Vec<(Vec<Type>, Type)> = self
            .table
            .lookup_all(name)
            .iter()
            .filter_map(|symbol| symbol.params().map(|params| (params.to_vec(), symbol.ty)))
            .collect();

        if candidates.is_empty() {
            if self.table.lookup(name).is_some() {
                self.error(
                    TypeErrorKind::ExpressionTypeMismatch,
                    format!("'{}' is not a function", name),
                    position,
                );
            }
            return Type::Error;
        }

        let accepts = |params: &[Type]| {
            params.len() == arguments.len()
                && params
                    .iter()
                    .zip(&arguments)
                    .all(|(param, argument)| param.is_compatible_with(argument))
        };

        if let Some((_, return_type)) = candidates
            .iter()
            .find(|(params, _)| params.as_slice() == arguments.as_slice())
            .or_else(|| candidates.iter().find(|(params, _)| accepts(params)))
        {
            return *return_type;
        }

        let Some((params, return_type)) = candidates
            .iter()
            .find(|(params, _)| params.len() == arguments.len())
        else {
            let (params, return_type) = &candidates[0];
            self.error(
                TypeErrorKind::FnCallParamCount,
                format!(
                    "function '{}' expects {} argument(s), found {}",
                    name,
                    params.len(),
                    arguments.len()
                ),
                position,
            );
            return *return_type;
        };

        for (index, (param, argument)) in params.iter().zip(&arguments).enumerate() {
            if !param.is_compatible_with(argument) {
                self.error(
                    TypeErrorKind::FnCallParamType,
                    format!(
                        "argument {} of '{}' expects `{}`, found `{}`",
                        index + 1,
                        name,
                        param,
                        argument
                    ),
                    call.arguments[index].get_span().start,
                );
            }
        }

        *return_type
    }
}
