use crate::{
    ast::{
        ast::Statement,
        expressions::Identifier,
        statements::{BlockStatement, ExpressionStatement, LetStatement, ReturnStatement},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

// Statement handlers start on the statement's first token and leave the
// cursor on its last one.

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    if let Some(handler) = handler {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Statement::Expression(ExpressionStatement { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();

    let name = Identifier::from(parser.expect_peek(TokenKind::Identifier)?);
    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Statement::Let(LetStatement { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Statement::Return(ReturnStatement { token, value }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::Block(parse_block(parser)?))
}

/// Parses `{ ... }` starting on the `{`, ending on the matching `}` or `EOF`.
///
/// End of input also closes the block: the statements read so far are kept
/// and an `UnterminatedBlock` error is recorded next to them.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, Error> {
    let token = parser.advance();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            let error = Error::new(ErrorImpl::UnterminatedBlock, parser.get_position());
            parser.record_error(error);
            break;
        }

        statements.push(parse_stmt(parser)?);
        parser.advance();
    }

    Ok(BlockStatement { token, statements })
}
