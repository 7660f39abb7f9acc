//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, type names and identifiers
//! - Numeric, string, character and boolean literals
//! - Operators and punctuation
//! - Comments and include directives
//! - Line/column tracking and error cases

use super::{
    lexer::{tokenize, unescape},
    tokens::TokenKind,
};
use crate::Position;

#[test]
fn test_tokenize_keywords() {
    let source = "if else while do for switch case default break return print main enum".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::If);
    assert_eq!(tokens[1].kind, TokenKind::Else);
    assert_eq!(tokens[2].kind, TokenKind::While);
    assert_eq!(tokens[3].kind, TokenKind::Do);
    assert_eq!(tokens[4].kind, TokenKind::For);
    assert_eq!(tokens[5].kind, TokenKind::Switch);
    assert_eq!(tokens[6].kind, TokenKind::Case);
    assert_eq!(tokens[7].kind, TokenKind::Default);
    assert_eq!(tokens[8].kind, TokenKind::Break);
    assert_eq!(tokens[9].kind, TokenKind::Return);
    assert_eq!(tokens[10].kind, TokenKind::Print);
    assert_eq!(tokens[11].kind, TokenKind::Main);
    assert_eq!(tokens[12].kind, TokenKind::Enum);
    assert_eq!(tokens[13].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_type_names() {
    let source = "int float double char bool void string".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[2].kind, TokenKind::Double);
    assert_eq!(tokens[3].kind, TokenKind::Char);
    assert_eq!(tokens[4].kind, TokenKind::Bool);
    assert_eq!(tokens[5].kind, TokenKind::Void);
    assert_eq!(tokens[6].kind, TokenKind::StringType);
    assert!(tokens[..7].iter().all(|token| token.kind.is_type_keyword()));
    assert!(!TokenKind::Identifier.is_type_keyword());
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore integer".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "integer");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_and_chars() {
    let source = r#""hello" "tab\there" 'a' '\n' "quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[2].value, "a");
    assert_eq!(tokens[3].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[3].value, "\n");
    assert_eq!(tokens[4].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[4].value, "quote\"test");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape(r"a\nb"), "a\nb");
    assert_eq!(unescape(r"\\"), "\\");
    assert_eq!(unescape(r"\0"), "\0");
    assert_eq!(unescape(r"\q"), "\\q");
}

#[test]
fn test_tokenize_booleans() {
    let source = "true false".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[1].value, "false");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || & | ^ << >> ! ++ --".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::BitAnd,
            TokenKind::BitOr,
            TokenKind::BitXor,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Not,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] . , ; :".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Dot);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Colon);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "int x = 5; // line comment\n/* block\ncomment */ int y;".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::Int);
    assert_eq!(tokens[6].value, "y");
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_includes() {
    let source = "#include <stdio.h>\ninclude \"util.h\"\nincluded".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Include);
    assert_eq!(tokens[0].value, "stdio.h");
    assert_eq!(tokens[1].kind, TokenKind::Include);
    assert_eq!(tokens[1].value, "util.h");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "included");
}

#[test]
fn test_token_positions() {
    let source = "int x;\n  x = 10;".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens[0].span.start, Position::new(1, 1));
    assert_eq!(tokens[0].span.end, Position::new(1, 4));
    assert_eq!(tokens[1].span.start, Position::new(1, 5));
    assert_eq!(tokens[3].span.start, Position::new(2, 3));
    assert_eq!(tokens[5].span.start, Position::new(2, 7));
    assert_eq!(tokens[5].value, "10");
}

#[test]
fn test_token_debug_rendering() {
    let tokens = tokenize("x;".to_string(), None).unwrap();

    assert_eq!(tokens[0].debug(), "1:1 Identifier (x)");
    assert_eq!(tokens[1].debug(), "1:2 Semicolon ()");
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "int x = @;".to_string();
    let error = tokenize(source, Some("test.c".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(*error.get_position(), Position::new(1, 9));
}

#[test]
fn test_tokenize_simple_program() {
    let source = "int main() { return 0; }".to_string();
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();

    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Main);
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[3].kind, TokenKind::CloseParen);
    assert_eq!(tokens[4].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[5].kind, TokenKind::Return);
    assert_eq!(tokens[6].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[9].kind, TokenKind::EOF);
}
