//! Lowering state shared by the statement and expression generators.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::ast::ast::Program;

use super::{
    instruction::{Instruction, Label, Operand, TacProgram},
    stmt::gen_statement,
};

/// Holds the instruction stream being built together with the counters and
/// lookup state that lowering needs.
///
/// The generator trusts its input: the program must already have passed scope
/// analysis and type checking.
#[derive(Debug, Default)]
pub struct TacGenerator {
    instructions: Vec<Instruction>,
    next_temp: u32,
    next_label: u32,
    /// End labels of the enclosing loops and switches, innermost last.
    break_labels: Vec<Label>,
    /// Enum constants and their ordinals.
    enum_values: HashMap<String, i64>,
    /// Parameters of the function being lowered. They shadow enum constants.
    params: HashSet<String>,
}

/// Lowers a checked program to three-address code.
pub fn generate(program: &Program) -> TacProgram {
    let mut generator = TacGenerator::new();

    for stmt in &program.body {
        gen_statement(&mut generator, stmt);
    }

    debug!(
        "TacGenerator: emitted {} instruction(s), {} temporaries, {} labels",
        generator.instructions.len(),
        generator.next_temp,
        generator.next_label
    );
    generator.finish()
}

impl TacGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> TacProgram {
        TacProgram {
            instructions: self.instructions,
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn last_instruction(&self) -> Option<&Instruction> {
        self.instructions.last()
    }

    pub fn new_temp(&mut self) -> Operand {
        let temp = Operand::Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub fn new_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    pub fn push_break_label(&mut self, label: Label) {
        self.break_labels.push(label);
    }

    pub fn pop_break_label(&mut self) -> Option<Label> {
        self.break_labels.pop()
    }

    pub fn break_label(&self) -> Option<Label> {
        self.break_labels.last().copied()
    }

    /// Registers an enum's values with ordinals counting up from zero.
    pub fn define_enum<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for (ordinal, name) in names.into_iter().enumerate() {
            self.enum_values.insert(name.to_string(), ordinal as i64);
        }
    }

    pub fn enum_value(&self, name: &str) -> Option<i64> {
        if self.params.contains(name) {
            return None;
        }

        self.enum_values.get(name).copied()
    }

    pub fn begin_function<'a>(&mut self, params: impl IntoIterator<Item = &'a str>) {
        self.params = params.into_iter().map(str::to_string).collect();
    }

    pub fn end_function(&mut self) {
        self.params.clear();
        self.break_labels.clear();
    }
}
