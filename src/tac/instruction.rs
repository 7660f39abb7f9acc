use std::fmt::Display;

/// A value an instruction can read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Compiler generated temporary, rendered `tN`.
    Temp(u32),
    /// A source level variable or parameter.
    Variable(String),
    /// Literal text, already in its TAC spelling.
    Constant(String),
}

impl Operand {
    pub fn variable(name: impl Into<String>) -> Self {
        Operand::Variable(name.into())
    }

    pub fn constant(text: impl Into<String>) -> Self {
        Operand::Constant(text.into())
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Temp(index) => write!(f, "t{}", index),
            Operand::Variable(name) => write!(f, "{}", name),
            Operand::Constant(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub u32);

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `dest = value`
    Assign { dest: Operand, value: Operand },
    /// `dest = left op right`
    Binary {
        dest: Operand,
        op: &'static str,
        left: Operand,
        right: Operand,
    },
    /// `dest = op operand`
    Unary {
        dest: Operand,
        op: &'static str,
        operand: Operand,
    },
    /// `if cond == 0 goto label`
    IfFalse { condition: Operand, target: Label },
    /// `if cond != 0 goto label`
    IfTrue { condition: Operand, target: Label },
    /// `if left == right goto label`
    IfEqual {
        left: Operand,
        right: Operand,
        target: Label,
    },
    Goto(Label),
    Label(Label),
    /// `[dest =] call callee(args)`
    Call {
        dest: Option<Operand>,
        callee: String,
        args: Vec<Operand>,
    },
    Return(Option<Operand>),
    FunctionBegin(String),
    FunctionEnd(String),
    /// `name = param`
    Param(String),
}

impl Instruction {
    pub fn is_return(&self) -> bool {
        matches!(self, Instruction::Return(_))
    }

    /// Instructions rendered at column zero.
    fn is_flush_left(&self) -> bool {
        matches!(
            self,
            Instruction::Label(_) | Instruction::FunctionBegin(_) | Instruction::FunctionEnd(_)
        )
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Assign { dest, value } => write!(f, "{} = {}", dest, value),
            Instruction::Binary {
                dest,
                op,
                left,
                right,
            } => write!(f, "{} = {} {} {}", dest, left, op, right),
            Instruction::Unary { dest, op, operand } => write!(f, "{} = {}{}", dest, op, operand),
            Instruction::IfFalse { condition, target } => {
                write!(f, "if {} == 0 goto {}", condition, target)
            }
            Instruction::IfTrue { condition, target } => {
                write!(f, "if {} != 0 goto {}", condition, target)
            }
            Instruction::IfEqual {
                left,
                right,
                target,
            } => write!(f, "if {} == {} goto {}", left, right, target),
            Instruction::Goto(target) => write!(f, "goto {}", target),
            Instruction::Label(label) => write!(f, "{}:", label),
            Instruction::Call { dest, callee, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                match dest {
                    Some(dest) => write!(f, "{} = call {}({})", dest, callee, args),
                    None => write!(f, "call {}({})", callee, args),
                }
            }
            Instruction::Return(Some(value)) => write!(f, "return {}", value),
            Instruction::Return(None) => write!(f, "return"),
            Instruction::FunctionBegin(name) => write!(f, "function {} begin", name),
            Instruction::FunctionEnd(name) => write!(f, "function {} end", name),
            Instruction::Param(name) => write!(f, "{} = param", name),
        }
    }
}

/// The lowered program, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TacProgram {
    pub instructions: Vec<Instruction>,
}

impl TacProgram {
    pub fn lines(&self) -> Vec<String> {
        self.instructions
            .iter()
            .map(|instruction| instruction.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Display for TacProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in &self.instructions {
            if instruction.is_flush_left() {
                writeln!(f, "{}", instruction)?;
            } else {
                writeln!(f, "  {}", instruction)?;
            }
        }

        Ok(())
    }
}
