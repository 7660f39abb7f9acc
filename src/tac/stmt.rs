use log::debug;

use crate::ast::{
    ast::{Expr, Stmt},
    statements::{BlockStmt, DoWhileStmt, ForStmt, IfStmt, Param, SwitchStmt, WhileStmt},
    types::Type,
};

use super::{
    expr::{gen_call, gen_expression},
    generator::TacGenerator,
    instruction::{Instruction, Operand},
};

pub fn gen_statement(generator: &mut TacGenerator, statement: &Stmt) {
    match statement {
        Stmt::VarDecl(decl) => {
            let value = match &decl.initializer {
                Some(initializer) => gen_expression(generator, initializer),
                None => Operand::constant("0"),
            };

            generator.emit(Instruction::Assign {
                dest: Operand::variable(&decl.name),
                value,
            });
        }
        Stmt::FunctionProto(_) | Stmt::Include(_) => {}
        Stmt::EnumDecl(decl) => {
            generator.define_enum(decl.values.values.iter().map(|value| value.name.as_str()));
        }
        Stmt::FunctionDecl(function) => {
            let implicit_return = match function.return_type {
                Type::Void => None,
                _ => Some(Operand::constant("0")),
            };
            gen_function(
                generator,
                &function.name,
                &function.params,
                &function.body,
                implicit_return,
            );
        }
        Stmt::MainDecl(main) => {
            gen_function(generator, "main", &[], &main.body, Some(Operand::constant("0")));
        }
        Stmt::Block(block) => gen_block(generator, block),
        Stmt::If(stmt) => gen_if(generator, stmt),
        Stmt::While(stmt) => gen_while(generator, stmt),
        Stmt::DoWhile(stmt) => gen_do_while(generator, stmt),
        Stmt::For(stmt) => gen_for(generator, stmt),
        Stmt::Switch(stmt) => gen_switch(generator, stmt),
        Stmt::Return(stmt) => {
            let value = stmt
                .value
                .as_ref()
                .map(|value| gen_expression(generator, value));
            generator.emit(Instruction::Return(value));
        }
        Stmt::Break(stmt) => match generator.break_label() {
            Some(label) => generator.emit(Instruction::Goto(label)),
            None => debug!("TacGenerator: `break` outside a loop at {}", stmt.span.start),
        },
        Stmt::Print(stmt) => {
            let args = stmt
                .arguments
                .iter()
                .map(|argument| gen_expression(generator, argument))
                .collect();

            generator.emit(Instruction::Call {
                dest: None,
                callee: String::from("print"),
                args,
            });
        }
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Call(call) => {
                gen_call(generator, call, false);
            }
            expression => {
                gen_expression(generator, expression);
            }
        },
    }
}

fn gen_block(generator: &mut TacGenerator, block: &BlockStmt) {
    for stmt in &block.body {
        gen_statement(generator, stmt);
    }
}

fn gen_function(
    generator: &mut TacGenerator,
    name: &str,
    params: &[Param],
    body: &BlockStmt,
    implicit_return: Option<Operand>,
) {
    generator.emit(Instruction::FunctionBegin(name.to_string()));
    generator.begin_function(params.iter().map(|param| param.name.as_str()));

    for param in params {
        generator.emit(Instruction::Param(param.name.clone()));
    }

    gen_block(generator, body);

    // Falling off the end returns the default value
    if !generator
        .last_instruction()
        .is_some_and(Instruction::is_return)
    {
        generator.emit(Instruction::Return(implicit_return));
    }

    generator.end_function();
    generator.emit(Instruction::FunctionEnd(name.to_string()));
}

fn gen_if(generator: &mut TacGenerator, stmt: &IfStmt) {
    let condition = gen_expression(generator, &stmt.condition);
    let else_label = generator.new_label();

    generator.emit(Instruction::IfFalse {
        condition,
        target: else_label,
    });
    gen_block(generator, &stmt.if_body);

    match &stmt.else_body {
        Some(else_body) => {
            let end_label = generator.new_label();
            generator.emit(Instruction::Goto(end_label));
            generator.emit(Instruction::Label(else_label));
            gen_block(generator, else_body);
            generator.emit(Instruction::Label(end_label));
        }
        None => generator.emit(Instruction::Label(else_label)),
    }
}

fn gen_while(generator: &mut TacGenerator, stmt: &WhileStmt) {
    let start_label = generator.new_label();
    let condition_label = generator.new_label();
    let end_label = generator.new_label();

    generator.emit(Instruction::Goto(condition_label));
    generator.emit(Instruction::Label(start_label));

    generator.push_break_label(end_label);
    gen_block(generator, &stmt.body);
    generator.pop_break_label();

    generator.emit(Instruction::Label(condition_label));
    let condition = gen_expression(generator, &stmt.condition);
    generator.emit(Instruction::IfTrue {
        condition,
        target: start_label,
    });
    generator.emit(Instruction::Label(end_label));
}

fn gen_do_while(generator: &mut TacGenerator, stmt: &DoWhileStmt) {
    let start_label = generator.new_label();
    let condition_label = generator.new_label();
    let end_label = generator.new_label();

    generator.emit(Instruction::Label(start_label));

    generator.push_break_label(end_label);
    gen_block(generator, &stmt.body);
    generator.pop_break_label();

    generator.emit(Instruction::Label(condition_label));
    let condition = gen_expression(generator, &stmt.condition);
    generator.emit(Instruction::IfTrue {
        condition,
        target: start_label,
    });
    generator.emit(Instruction::Label(end_label));
}

fn gen_for(generator: &mut TacGenerator, stmt: &ForStmt) {
    if let Some(init) = &stmt.init {
        gen_statement(generator, init);
    }

    let start_label = generator.new_label();
    let continue_label = generator.new_label();
    let condition_label = generator.new_label();
    let end_label = generator.new_label();

    generator.emit(Instruction::Goto(condition_label));
    generator.emit(Instruction::Label(start_label));

    generator.push_break_label(end_label);
    gen_block(generator, &stmt.body);
    generator.pop_break_label();

    generator.emit(Instruction::Label(continue_label));
    if let Some(update) = &stmt.update {
        gen_expression(generator, update);
    }

    generator.emit(Instruction::Label(condition_label));
    match &stmt.condition {
        Some(condition) => {
            let condition = gen_expression(generator, condition);
            generator.emit(Instruction::IfTrue {
                condition,
                target: start_label,
            });
        }
        None => generator.emit(Instruction::Goto(start_label)),
    }
    generator.emit(Instruction::Label(end_label));
}

/// Cases do not fall through; every case body ends with a jump to the end label.
fn gen_switch(generator: &mut TacGenerator, stmt: &SwitchStmt) {
    let subject = gen_expression(generator, &stmt.expression);
    let end_label = generator.new_label();

    let mut case_labels = Vec::with_capacity(stmt.cases.len());
    for case in &stmt.cases {
        let value = gen_expression(generator, &case.value);
        let case_label = generator.new_label();

        generator.emit(Instruction::IfEqual {
            left: subject.clone(),
            right: value,
            target: case_label,
        });
        case_labels.push(case_label);
    }

    let default_label = stmt.default_body.as_ref().map(|_| generator.new_label());
    generator.emit(Instruction::Goto(default_label.unwrap_or(end_label)));

    generator.push_break_label(end_label);
    for (case, case_label) in stmt.cases.iter().zip(case_labels) {
        generator.emit(Instruction::Label(case_label));
        gen_block(generator, &case.body);
        generator.emit(Instruction::Goto(end_label));
    }

    if let (Some(default_body), Some(default_label)) = (&stmt.default_body, default_label) {
        generator.emit(Instruction::Label(default_label));
        gen_block(generator, default_body);
    }
    generator.pop_break_label();

    generator.emit(Instruction::Label(end_label));
}
