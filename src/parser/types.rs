//! Type parsing implementation.
//!
//! Every type in the language is a single keyword, so type parsing is a
//! lookup from the keyword token to its [`Type`].

use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type keyword handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for the type keyword lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Int, parse_primitive_type);
    parser.type_nud(TokenKind::Float, parse_primitive_type);
    parser.type_nud(TokenKind::Double, parse_primitive_type);
    parser.type_nud(TokenKind::Char, parse_primitive_type);
    parser.type_nud(TokenKind::Bool, parse_primitive_type);
    parser.type_nud(TokenKind::Void, parse_primitive_type);
    parser.type_nud(TokenKind::StringType, parse_primitive_type);
}

/// Parses the type keyword at the cursor.
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&kind) {
        Some(handler) => handler(parser),
        None => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a type name"),
            },
            parser.get_position(),
        )),
    }
}

fn parse_primitive_type(parser: &mut Parser) -> Result<Type, Error> {
    let ty = match parser.current_token_kind() {
        TokenKind::Int => Type::Int,
        TokenKind::Float => Type::Float,
        TokenKind::Double => Type::Double,
        TokenKind::Char => Type::Char,
        TokenKind::Bool => Type::Bool,
        TokenKind::Void => Type::Void,
        TokenKind::StringType => Type::String,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    parser.advance();
    Ok(ty)
}
