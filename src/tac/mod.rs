//! Three-address code generation.
//!
//! Lowers a checked AST into a flat list of [`instruction::Instruction`]s over
//! temporaries (`t0, t1, ...`) and labels (`L0, L1, ...`). Structured control
//! flow becomes conditional and unconditional jumps; `break` jumps to the end
//! label of the innermost loop or switch.

pub mod expr;
pub mod generator;
pub mod instruction;
pub mod stmt;
