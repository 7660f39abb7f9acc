#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{CompileError, Error, ErrorTip},
    tac::instruction::TacProgram,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod tac;
pub mod type_checker;

extern crate regex;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }
}

/// Returns the text of the given 1-based line, without its trailing newline.
pub fn get_line_at_position(source: &str, position: Position) -> Option<&str> {
    if position.line == 0 {
        return None;
    }

    source
        .split_inclusive('\n')
        .nth(position.line as usize - 1)
        .map(|line| line.trim_end_matches(['\n', '\r']))
}

/// Parses source text into a [`Program`], reporting the first syntax error.
pub fn parse_source(source: &str, file_name: &str) -> Result<Program, Error> {
    let tokens = lexer::lexer::tokenize(source.to_string(), Some(file_name.to_string()))?;
    parser::parser::parse(tokens)
}

/// Runs every stage of the pipeline and returns the generated three-address code.
///
/// Stops at the first stage that reports diagnostics; no TAC is produced when scope or
/// type errors exist.
pub fn compile(source: &str, file_name: &str) -> Result<TacProgram, CompileError> {
    let program = parse_source(source, file_name)?;

    let (_, scope_errors) = scope::analyzer::analyze(&program);
    if !scope_errors.is_empty() {
        return Err(CompileError::Scope(scope_errors));
    }

    let type_errors = type_checker::type_checker::type_check(&program);
    if !type_errors.is_empty() {
        return Err(CompileError::Type(type_errors));
    }

    Ok(tac::generator::generate(&program))
}


/// Prints a caret-annotated diagnostic for a front-end error.
pub fn display_error(error: &Error, source: &str, file_name: &str) {
    /*
        Error: message
        -> final.c
           |
        20 | int a = #;
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }

    print_source_excerpt(source, file_name, *error.get_position());
}

/// Prints a scope or type diagnostic in the same layout as [`display_error`].
pub fn display_diagnostic(stage: &str, message: &str, position: Position, source: &str, file_name: &str) {
    eprintln!("{} Error: {}", stage, message);
    print_source_excerpt(source, file_name, position);
}

fn print_source_excerpt(source: &str, file_name: &str, position: Position) {
    eprintln!("-> {}:{}:{}", file_name, position.line, position.column);

    let Some(line_text) = get_line_at_position(source, position) else {
        return;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
