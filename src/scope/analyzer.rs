//! Scope analysis.
//!
//! Two passes over the program: the first records every declaration site by name,
//! the second walks the tree with a live [`ScopeTable`] and validates every
//! declaration and every identifier use against the chain of enclosing frames.
//! All problems are collected; the pass never stops early.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::{
            param_types, BlockStmt, EnumDeclStmt, FunctionDeclStmt, FunctionProtoStmt,
            MainDeclStmt, VarDeclStmt,
        },
        types::Type,
    },
    errors::errors::{ScopeError, ScopeErrorKind},
    Position,
};

use super::scope_table::{ScopeTable, SymbolInfo};

/// Every declared name mapped to all of its declaration sites, in source order.
pub type DeclarationIndex = HashMap<String, Vec<Position>>;

/// Runs both passes and returns the populated scope tree with the collected errors.
pub fn analyze(program: &Program) -> (ScopeTable, Vec<ScopeError>) {
    let declarations = collect_declarations(program);
    let mut analyzer = ScopeAnalyzer::new(&declarations);

    for stmt in &program.body {
        analyzer.analyze_stmt(stmt);
    }

    debug!(
        "scope analysis finished with {} error(s) across {} frame(s)",
        analyzer.errors.len(),
        analyzer.table.len()
    );

    (analyzer.table, analyzer.errors)
}

/// Collection pass: records declarations at every nesting depth.
pub fn collect_declarations(program: &Program) -> DeclarationIndex {
    let mut index = DeclarationIndex::new();

    for stmt in &program.body {
        collect_stmt(stmt, &mut index);
    }

    for positions in index.values_mut() {
        positions.sort();
    }

    index
}

fn record(index: &mut DeclarationIndex, name: &str, position: Position) {
    index.entry(name.to_string()).or_default().push(position);
}

fn collect_block(block: &BlockStmt, index: &mut DeclarationIndex) {
    for stmt in &block.body {
        collect_stmt(stmt, index);
    }
}

fn collect_stmt(stmt: &Stmt, index: &mut DeclarationIndex) {
    match stmt {
        Stmt::VarDecl(decl) => record(index, &decl.name, decl.span.start),
        Stmt::FunctionProto(proto) => {
            record(index, &proto.name, proto.span.start);
            for param in &proto.params {
                record(index, &param.name, param.span.start);
            }
        }
        Stmt::FunctionDecl(function) => {
            record(index, &function.name, function.span.start);
            for param in &function.params {
                record(index, &param.name, param.span.start);
            }
            collect_block(&function.body, index);
        }
        Stmt::MainDecl(main) => {
            record(index, "main", main.span.start);
            collect_block(&main.body, index);
        }
        Stmt::EnumDecl(decl) => {
            record(index, &decl.name, decl.span.start);
            for value in &decl.values.values {
                record(index, &value.name, value.span.start);
            }
        }
        Stmt::Block(block) => collect_block(block, index),
        Stmt::If(stmt) => {
            collect_block(&stmt.if_body, index);
            if let Some(else_body) = &stmt.else_body {
                collect_block(else_body, index);
            }
        }
        Stmt::While(stmt) => collect_block(&stmt.body, index),
        Stmt::DoWhile(stmt) => collect_block(&stmt.body, index),
        Stmt::For(stmt) => {
            if let Some(init) = &stmt.init {
                collect_stmt(init, index);
            }
            collect_block(&stmt.body, index);
        }
        Stmt::Switch(stmt) => {
            for case in &stmt.cases {
                collect_block(&case.body, index);
            }
            if let Some(default_body) = &stmt.default_body {
                collect_block(default_body, index);
            }
        }
        Stmt::Return(_)
        | Stmt::Break(_)
        | Stmt::Print(_)
        | Stmt::Expression(_)
        | Stmt::Include(_) => {}
    }
}

/// Analysis pass state.
pub struct ScopeAnalyzer<'a> {
    table: ScopeTable,
    declarations: &'a DeclarationIndex,
    errors: Vec<ScopeError>,
}

impl<'a> ScopeAnalyzer<'a> {
    pub fn new(declarations: &'a DeclarationIndex) -> Self {
        ScopeAnalyzer {
            table: ScopeTable::new(),
            declarations,
            errors: vec![],
        }
    }

    fn error(&mut self, kind: ScopeErrorKind, name: &str, position: Position) {
        debug!("scope error: {} '{}' at {}", kind, name, position);
        self.errors.push(ScopeError::new(kind, name, position));
    }

    pub fn analyze_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.analyze_var_decl(decl),
            Stmt::FunctionProto(proto) => self.analyze_function_proto(proto),
            Stmt::FunctionDecl(function) => self.analyze_function_decl(function),
            Stmt::MainDecl(main) => self.analyze_main_decl(main),
            Stmt::EnumDecl(decl) => self.analyze_enum_decl(decl),
            Stmt::Block(block) => self.analyze_block(block),
            Stmt::If(stmt) => {
                self.analyze_expr(&stmt.condition);
                self.analyze_block(&stmt.if_body);
                if let Some(else_body) = &stmt.else_body {
                    self.analyze_block(else_body);
                }
            }
            Stmt::While(stmt) => {
                self.analyze_expr(&stmt.condition);
                self.analyze_block(&stmt.body);
            }
            Stmt::DoWhile(stmt) => {
                self.analyze_block(&stmt.body);
                self.analyze_expr(&stmt.condition);
            }
            Stmt::For(stmt) => {
                // The header gets its own frame so the loop variable ends with the loop.
                self.table.enter_scope();
                if let Some(init) = &stmt.init {
                    self.analyze_stmt(init);
                }
                if let Some(condition) = &stmt.condition {
                    self.analyze_expr(condition);
                }
                if let Some(update) = &stmt.update {
                    self.analyze_expr(update);
                }
                self.analyze_block(&stmt.body);
                self.table.exit_scope();
            }
            Stmt::Switch(stmt) => {
                self.analyze_expr(&stmt.expression);
                for case in &stmt.cases {
                    self.analyze_expr(&case.value);
                    self.analyze_block(&case.body);
                }
                if let Some(default_body) = &stmt.default_body {
                    self.analyze_block(default_body);
                }
            }
            Stmt::Return(stmt) => {
                if let Some(value) = &stmt.value {
                    self.analyze_expr(value);
                }
            }
            Stmt::Print(stmt) => {
                for argument in &stmt.arguments {
                    self.analyze_expr(argument);
                }
            }
            Stmt::Expression(stmt) => self.analyze_expr(&stmt.expression),
            Stmt::Break(_) | Stmt::Include(_) => {}
        }
    }

    fn analyze_block(&mut self, block: &BlockStmt) {
        self.table.enter_scope();
        for stmt in &block.body {
            self.analyze_stmt(stmt);
        }
        self.table.exit_scope();
    }

    /// The initializer is resolved before the name is bound, so `int x = x;`
    /// does not see the variable it declares.
    fn analyze_var_decl(&mut self, decl: &VarDeclStmt) {
        if let Some(initializer) = &decl.initializer {
            self.analyze_expr(initializer);
        }

        let position = decl.span.start;

        if let Some(existing) = self.table.lookup_local(&decl.name) {
            let kind = if existing.is_variable() {
                ScopeErrorKind::VariableRedefinition
            } else {
                ScopeErrorKind::ConflictingDeclaration
            };
            self.error(kind, &decl.name, position);
            return;
        }

        if let Some(existing) = self.table.lookup_enclosing(&decl.name) {
            if existing.is_function() || existing.is_enum() || existing.is_enum_value() {
                self.error(ScopeErrorKind::ConflictingDeclaration, &decl.name, position);
                return;
            }
        }

        self.table
            .declare(SymbolInfo::variable(&decl.name, decl.ty, position));
    }

    fn analyze_function_proto(&mut self, proto: &FunctionProtoStmt) {
        let position = proto.span.start;
        let params = param_types(&proto.params);
        let local = self.table.lookup_local_all(&proto.name);

        if local.iter().any(|symbol| !symbol.is_function()) {
            self.error(ScopeErrorKind::ConflictingDeclaration, &proto.name, position);
            return;
        }

        if let Some(existing) = local
            .iter()
            .find(|symbol| symbol.params() == Some(params.as_slice()))
        {
            let redeclared_prototype = existing.is_prototype();
            let same_return = existing.ty == proto.return_type;

            if !same_return {
                self.error(ScopeErrorKind::ConflictingDeclaration, &proto.name, position);
            } else if redeclared_prototype {
                self.error(
                    ScopeErrorKind::FunctionPrototypeRedefinition,
                    &proto.name,
                    position,
                );
            }

            // A prototype after a matching definition adds nothing.
            return;
        }

        self.table.declare(SymbolInfo::function(
            &proto.name,
            proto.return_type,
            params,
            true,
            position,
        ));
    }

    /// A definition may complete a matching prototype or add a new overload.
    /// The body is analyzed even when the declaration itself is rejected.
    fn analyze_function_decl(&mut self, function: &FunctionDeclStmt) {
        let position = function.span.start;
        let params = param_types(&function.params);

        if self
            .table
            .lookup_local_all(&function.name)
            .iter()
            .any(|symbol| !symbol.is_function())
        {
            self.error(ScopeErrorKind::ConflictingDeclaration, &function.name, position);
        } else if let Some(existing) = self.table.lookup_local_function_mut(&function.name, &params) {
            if existing.is_prototype() && existing.ty == function.return_type {
                existing.complete_prototype();
            } else {
                self.error(
                    ScopeErrorKind::ConflictingFunctionDefinition,
                    &function.name,
                    position,
                );
            }
        } else {
            self.table.declare(SymbolInfo::function(
                &function.name,
                function.return_type,
                params,
                false,
                position,
            ));
        }

        self.table.enter_scope();

        let mut seen = HashSet::new();
        for param in &function.params {
            if !seen.insert(param.name.as_str()) {
                self.error(
                    ScopeErrorKind::ParameterRedefinition,
                    &param.name,
                    param.span.start,
                );
                continue;
            }

            self.table
                .declare(SymbolInfo::variable(&param.name, param.ty, param.span.start));
        }

        for stmt in &function.body.body {
            self.analyze_stmt(stmt);
        }

        self.table.exit_scope();
    }

    fn analyze_main_decl(&mut self, main: &MainDeclStmt) {
        let position = main.span.start;

        if self.table.lookup_local("main").is_some() {
            self.error(ScopeErrorKind::ConflictingFunctionDefinition, "main", position);
        } else {
            self.table
                .declare(SymbolInfo::function("main", Type::Int, vec![], false, position));
        }

        self.table.enter_scope();
        for stmt in &main.body.body {
            self.analyze_stmt(stmt);
        }
        self.table.exit_scope();
    }

    fn analyze_enum_decl(&mut self, decl: &EnumDeclStmt) {
        let position = decl.span.start;

        if self.table.current_level() > 0 {
            self.error(ScopeErrorKind::InvalidStorageClassUsage, &decl.name, position);
            return;
        }

        if let Some(existing) = self.table.lookup_local(&decl.name) {
            let kind = if existing.is_enum() {
                ScopeErrorKind::EnumRedefinition
            } else {
                ScopeErrorKind::ConflictingDeclaration
            };
            self.error(kind, &decl.name, position);
            return;
        }

        self.table
            .declare(SymbolInfo::enumeration(&decl.name, position));

        let mut seen = HashSet::new();
        for value in &decl.values.values {
            let value_position = value.span.start;

            if !seen.insert(value.name.as_str()) {
                self.error(
                    ScopeErrorKind::EnumVariantRedefinition,
                    &value.name,
                    value_position,
                );
                continue;
            }

            if self.table.lookup(&value.name).is_some() {
                self.error(
                    ScopeErrorKind::ConflictingDeclaration,
                    &value.name,
                    value_position,
                );
                continue;
            }

            self.table
                .declare(SymbolInfo::enum_value(&value.name, value_position));
        }
    }

    pub fn analyze_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int(_) | Expr::Float(_) | Expr::String(_) | Expr::Char(_) | Expr::Bool(_) => {}
            Expr::Symbol(symbol) => self.resolve(&symbol.value, symbol.span.start, false),
            Expr::Binary(binary) => {
                self.analyze_expr(&binary.left);
                self.analyze_expr(&binary.right);
            }
            Expr::Unary(unary) => self.analyze_expr(&unary.operand),
            Expr::Call(call) => {
                self.resolve(&call.callee.value, call.callee.span.start, true);
                for argument in &call.arguments {
                    self.analyze_expr(argument);
                }
            }
        }
    }

    /// Looks a name up through the enclosing frames and classifies a miss.
    ///
    /// A miss is a forward reference when the name is declared somewhere after the
    /// point of use; otherwise it was never declared at all.
    fn resolve(&mut self, name: &str, position: Position, is_call: bool) {
        if self.table.lookup(name).is_some() {
            return;
        }

        // Declared somewhere in the program, just not visible here
        let kind = if self.declarations.contains_key(name) {
            ScopeErrorKind::InvalidForwardReference
        } else if is_call {
            ScopeErrorKind::UndefinedFunctionCalled
        } else {
            ScopeErrorKind::UndeclaredVariableAccessed
        };

        self.error(kind, name, position);
    }
}
