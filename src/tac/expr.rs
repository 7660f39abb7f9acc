use crate::ast::{
    ast::Expr,
    expressions::{BinaryExpr, BinaryOp, CallExpr, UnaryExpr, UnaryOp},
};

use super::{
    generator::TacGenerator,
    instruction::{Instruction, Operand},
};

/// Lowers an expression and returns the operand holding its value.
pub fn gen_expression(generator: &mut TacGenerator, expression: &Expr) -> Operand {
    match expression {
        Expr::Int(literal) => Operand::constant(literal.value.to_string()),
        Expr::Float(literal) => Operand::constant(format!("{:?}", literal.value)),
        Expr::String(literal) => Operand::constant(format!("{:?}", literal.value)),
        Expr::Char(literal) => Operand::constant(format!("{:?}", literal.value)),
        Expr::Bool(literal) => Operand::constant(literal.value.to_string()),
        Expr::Symbol(symbol) => match generator.enum_value(&symbol.value) {
            Some(ordinal) => Operand::constant(ordinal.to_string()),
            None => Operand::variable(&symbol.value),
        },
        Expr::Binary(binary) => gen_binary(generator, binary),
        Expr::Unary(unary) => gen_unary(generator, unary),
        Expr::Call(call) => gen_call(generator, call, true).unwrap_or(Operand::constant("0")),
    }
}

fn gen_binary(generator: &mut TacGenerator, binary: &BinaryExpr) -> Operand {
    if binary.op == BinaryOp::Assign {
        let value = gen_expression(generator, &binary.right);
        let Some(target) = binary.left.as_symbol() else {
            return value;
        };

        let dest = Operand::variable(&target.value);
        generator.emit(Instruction::Assign {
            dest: dest.clone(),
            value,
        });
        return dest;
    }

    let left = gen_expression(generator, &binary.left);
    let right = gen_expression(generator, &binary.right);
    let dest = generator.new_temp();

    generator.emit(Instruction::Binary {
        dest: dest.clone(),
        op: binary.op.symbol(),
        left,
        right,
    });
    dest
}

fn gen_unary(generator: &mut TacGenerator, unary: &UnaryExpr) -> Operand {
    let op = match unary.op {
        UnaryOp::Increment => "+",
        UnaryOp::Decrement => "-",
        UnaryOp::Not | UnaryOp::Negate | UnaryOp::Plus => {
            let operand = gen_expression(generator, &unary.operand);
            let dest = generator.new_temp();

            generator.emit(Instruction::Unary {
                dest: dest.clone(),
                op: unary.op.symbol(),
                operand,
            });
            return dest;
        }
    };

    let operand = gen_expression(generator, &unary.operand);

    // x++ hands back the value from before the update
    let previous = if unary.is_postfix {
        let saved = generator.new_temp();
        generator.emit(Instruction::Assign {
            dest: saved.clone(),
            value: operand.clone(),
        });
        Some(saved)
    } else {
        None
    };

    let updated = generator.new_temp();
    generator.emit(Instruction::Binary {
        dest: updated.clone(),
        op,
        left: operand.clone(),
        right: Operand::constant("1"),
    });

    let result = match operand {
        Operand::Variable(_) => {
            generator.emit(Instruction::Assign {
                dest: operand.clone(),
                value: updated,
            });
            operand
        }
        _ => updated,
    };

    previous.unwrap_or(result)
}

/// Lowers a call. With `wants_value` the result lands in a fresh temporary,
/// otherwise the call is emitted bare and nothing is returned.
pub fn gen_call(generator: &mut TacGenerator, call: &CallExpr, wants_value: bool) -> Option<Operand> {
    let args = call
        .arguments
        .iter()
        .map(|argument| gen_expression(generator, argument))
        .collect();

    let dest = wants_value.then(|| generator.new_temp());
    generator.emit(Instruction::Call {
        dest: dest.clone(),
        callee: call.callee.value.clone(),
        args,
    });
    dest
}
