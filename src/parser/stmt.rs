use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            BlockStmt, BreakStmt, CaseBlock, DoWhileStmt, EnumDeclStmt, EnumValue, EnumValueList,
            ExpressionStmt, ForStmt, FunctionDeclStmt, FunctionProtoStmt, IfStmt, IncludeStmt,
            MainDeclStmt, Param, PrintStmt, ReturnStmt, SwitchStmt, VarDeclStmt, WhileStmt,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_arguments, parse_expr},
        lookups::BindingPower,
    },
    Position, Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expr.get_span().start,
            end: parser.previous_end(),
        },
        expression: expr,
    }))
}

/// Parses `{ ... }` into a block, reporting EOF inside it as an unterminated block.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(Error::new(ErrorImpl::UnterminatedBlock, parser.get_position()));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// Parses a construct body. A single statement is wrapped into its own block.
fn parse_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        return parse_block(parser);
    }

    let stmt = parse_stmt(parser)?;
    Ok(BlockStmt {
        span: *stmt.get_span(),
        body: vec![stmt],
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

/// Handles everything that starts with a type keyword: variables, prototypes,
/// function definitions and `int main()`.
pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let ty = parse_type(parser)?;

    if parser.current_token_kind() == TokenKind::Main {
        parser.advance();
        parser.expect(TokenKind::OpenParen)?;
        parser.expect(TokenKind::CloseParen)?;
        let body = parse_block(parser)?;

        return Ok(Stmt::MainDecl(MainDeclStmt {
            body,
            span: Span::new(start, parser.previous_end()),
        }));
    }

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier after type name"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    if parser.current_token_kind() != TokenKind::OpenParen {
        return finish_var_decl(parser, ty, name, start);
    }

    let params = parse_params(parser)?;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        return Ok(Stmt::FunctionProto(FunctionProtoStmt {
            return_type: ty,
            name,
            params,
            span: Span::new(start, parser.previous_end()),
        }));
    }

    let body = parse_block(parser)?;

    Ok(Stmt::FunctionDecl(FunctionDeclStmt {
        return_type: ty,
        name,
        params,
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

/// Parses a plain `T name [= expr];` declaration.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let ty = parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    finish_var_decl(parser, ty, name, start)
}

fn finish_var_decl(parser: &mut Parser, ty: Type, name: String, start: Position) -> Result<Stmt, Error> {
    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        ty,
        name,
        initializer,
        span: Span::new(start, parser.previous_end()),
    }))
}

/// Parses `( [void | T a, T b, ...] )`.
fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    if parser.current_token_kind() == TokenKind::Void && parser.peek_kind(1) == TokenKind::CloseParen {
        parser.advance();
    }

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let start = parser.get_position();
        let ty = parse_type(parser)?;
        let name = parser.expect(TokenKind::Identifier)?.value;

        params.push(Param {
            ty,
            name,
            span: Span::new(start, parser.previous_end()),
        });

        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

pub fn parse_main_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        parser.expect(TokenKind::CloseParen)?;
    }

    let body = parse_block(parser)?;

    Ok(Stmt::MainDecl(MainDeclStmt {
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_enum_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    let list_start = parser.expect(TokenKind::OpenCurly)?.span.start;
    let mut values = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let token = parser.expect(TokenKind::Identifier)?;
        values.push(EnumValue {
            name: token.value,
            span: token.span,
        });

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    let list_end = parser.previous_end();

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Stmt::EnumDecl(EnumDeclStmt {
        name,
        values: EnumValueList {
            values,
            span: Span::new(list_start, list_end),
        },
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_include_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();

    Ok(Stmt::Include(IncludeStmt {
        header: token.value,
        span: token.span,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;
    let if_body = parse_body(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_body(parser)?)
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        if_body,
        else_body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;
    let body = parse_body(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let body = parse_body(parser)?;
    parser.expect(TokenKind::While)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::DoWhile(DoWhileStmt {
        body,
        condition,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenParen)?;

    let init = if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else if parser.current_token_kind().is_type_keyword() {
        Some(Box::new(parse_var_decl_stmt(parser)?))
    } else {
        let expression = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;
        Some(Box::new(Stmt::Expression(ExpressionStmt {
            span: *expression.get_span(),
            expression,
        })))
    };

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let update = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_body(parser)?;

    Ok(Stmt::For(ForStmt {
        init,
        condition,
        update,
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

/// Parses the statements of a `case v:` or `default:` arm, up to the next arm or
/// the end of the switch. The brace form `case v { ... }` is also accepted.
fn parse_case_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        return parse_block(parser);
    }

    let start = parser.expect(TokenKind::Colon)?.span.end;
    let mut body = vec![];

    while !matches!(
        parser.current_token_kind(),
        TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly
    ) {
        if !parser.has_tokens() {
            return Err(Error::new(ErrorImpl::UnterminatedBlock, parser.get_position()));
        }
        body.push(parse_stmt(parser)?);
    }

    Ok(BlockStmt {
        body,
        span: Span::new(start, parser.previous_end()),
    })
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let expression = parse_condition(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    let mut default_body = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::Case => {
                let case_start = parser.advance().span.start;
                let value = parse_expr(parser, BindingPower::Default)?;
                let body = parse_case_body(parser)?;

                cases.push(CaseBlock {
                    value,
                    body,
                    span: Span::new(case_start, parser.previous_end()),
                });
            }
            TokenKind::Default if default_body.is_none() => {
                parser.advance();
                default_body = Some(parse_case_body(parser)?);
            }
            TokenKind::EOF => {
                return Err(Error::new(ErrorImpl::UnterminatedBlock, parser.get_position()));
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: parser.current_token().value.clone(),
                        message: String::from("expected `case` or `default` inside switch"),
                    },
                    parser.get_position(),
                ));
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Switch(SwitchStmt {
        expression,
        cases,
        default_body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Break(BreakStmt {
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let arguments = parse_arguments(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt {
        arguments,
        span: Span::new(start, parser.previous_end()),
    }))
}
