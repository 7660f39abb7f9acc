use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOp, BoolExpr, CallExpr, CharExpr, FloatExpr, IntExpr, StringExpr,
            SymbolExpr, UnaryExpr, UnaryOp,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(next_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
            break;
        };

        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();
    let span = token.span;

    match token.kind {
        TokenKind::IntLiteral => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Int(IntExpr { value, span })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                span.start,
            )),
        },
        TokenKind::FloatLiteral => match token.value.parse::<f64>() {
            Ok(value) => Ok(Expr::Float(FloatExpr { value, span })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                span.start,
            )),
        },
        TokenKind::StringLiteral => Ok(Expr::String(StringExpr {
            value: token.value,
            span,
        })),
        TokenKind::CharLiteral => Ok(Expr::Char(CharExpr {
            value: token.value.chars().next().unwrap_or('\0'),
            span,
        })),
        TokenKind::BoolLiteral => Ok(Expr::Bool(BoolExpr {
            value: token.value == "true",
            span,
        })),
        TokenKind::Identifier => Ok(Expr::Symbol(SymbolExpr {
            value: token.value,
            span,
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            span.start,
        )),
    }
}

fn binary_operator(token: &Token) -> Result<BinaryOp, Error> {
    let op = match token.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Subtract,
        TokenKind::Star => BinaryOp::Multiply,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::Percent => BinaryOp::Modulo,
        TokenKind::Equals => BinaryOp::Equals,
        TokenKind::NotEquals => BinaryOp::NotEquals,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::LessEquals => BinaryOp::LessEquals,
        TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::BitAnd => BinaryOp::BitAnd,
        TokenKind::BitOr => BinaryOp::BitOr,
        TokenKind::BitXor => BinaryOp::BitXor,
        TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
        TokenKind::ShiftRight => BinaryOp::ShiftRight,
        TokenKind::Assignment => BinaryOp::Assign,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start,
            ))
        }
    };

    Ok(op)
}

fn unary_operator(token: &Token) -> Result<UnaryOp, Error> {
    let op = match token.kind {
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Dash => UnaryOp::Negate,
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::PlusPlus => UnaryOp::Increment,
        TokenKind::MinusMinus => UnaryOp::Decrement,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start,
            ))
        }
    };

    Ok(op)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = binary_operator(&operator_token)?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start,
            end: right.get_span().end,
        },
        op,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = unary_operator(&operator_token)?;
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: operator_token.span.start,
            end: operand.get_span().end,
        },
        op,
        operand: Box::new(operand),
        is_postfix: false,
    }))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = unary_operator(&operator_token)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: left.get_span().start,
            end: operator_token.span.end,
        },
        op,
        operand: Box::new(left),
        is_postfix: true,
    }))
}

/// Assignment is right-associative and only accepts a plain identifier on its left.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    if left.as_symbol().is_none() {
        return Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget,
            operator_token.span.start,
        ));
    }

    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start,
            end: right.get_span().end,
        },
        op: BinaryOp::Assign,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses a comma separated argument list up to and including the closing paren.
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(arguments)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let Expr::Symbol(callee) = left else {
        return Err(Error::new(
            ErrorImpl::InvalidCallTarget,
            parser.get_position(),
        ));
    };

    let arguments = parse_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start,
            end: parser.previous_end(),
        },
        callee,
        arguments,
    }))
}
