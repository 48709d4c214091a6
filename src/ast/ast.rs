use std::fmt::{self, Debug, Display};

use crate::Span;

use super::{
    expressions::{
        BooleanLiteral, CallExpression, FunctionLiteral, Identifier, IfExpression,
        InfixExpression, IntegerLiteral, PrefixExpression,
    },
    statements::{BlockStatement, ExpressionStatement, LetStatement, ReturnStatement},
};

/// Node Trait
///
/// Behaviour shared by every node in the AST. Rendering back to source-like
/// text goes through `Display`.
pub trait Node: Debug + Display {
    /// Returns the lexeme of the token that introduced the node.
    fn token_value(&self) -> &str;
    /// Returns the span of the token that introduced the node.
    fn get_span(&self) -> &Span;
}

/// Statement sum type
#[derive(Debug, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Node for Statement {
    fn token_value(&self) -> &str {
        match self {
            Statement::Let(stmt) => stmt.token_value(),
            Statement::Return(stmt) => stmt.token_value(),
            Statement::Expression(stmt) => stmt.token_value(),
            Statement::Block(stmt) => stmt.token_value(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Statement::Let(stmt) => stmt.get_span(),
            Statement::Return(stmt) => stmt.get_span(),
            Statement::Expression(stmt) => stmt.get_span(),
            Statement::Block(stmt) => stmt.get_span(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => Display::fmt(stmt, f),
            Statement::Return(stmt) => Display::fmt(stmt, f),
            Statement::Expression(stmt) => Display::fmt(stmt, f),
            Statement::Block(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// Expression sum type
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
}

impl Node for Expression {
    fn token_value(&self) -> &str {
        match self {
            Expression::Identifier(expr) => expr.token_value(),
            Expression::Integer(expr) => expr.token_value(),
            Expression::Boolean(expr) => expr.token_value(),
            Expression::Prefix(expr) => expr.token_value(),
            Expression::Infix(expr) => expr.token_value(),
            Expression::If(expr) => expr.token_value(),
            Expression::Function(expr) => expr.token_value(),
            Expression::Call(expr) => expr.token_value(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Expression::Identifier(expr) => expr.get_span(),
            Expression::Integer(expr) => expr.get_span(),
            Expression::Boolean(expr) => expr.get_span(),
            Expression::Prefix(expr) => expr.get_span(),
            Expression::Infix(expr) => expr.get_span(),
            Expression::If(expr) => expr.get_span(),
            Expression::Function(expr) => expr.get_span(),
            Expression::Call(expr) => expr.get_span(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(expr) => Display::fmt(expr, f),
            Expression::Integer(expr) => Display::fmt(expr, f),
            Expression::Boolean(expr) => Display::fmt(expr, f),
            Expression::Prefix(expr) => Display::fmt(expr, f),
            Expression::Infix(expr) => Display::fmt(expr, f),
            Expression::If(expr) => Display::fmt(expr, f),
            Expression::Function(expr) => Display::fmt(expr, f),
            Expression::Call(expr) => Display::fmt(expr, f),
        }
    }
}

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Lexeme of the first statement's token, or an empty string.
    pub fn token_value(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_value())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

/// Writes statements separated by spaces. An expression statement followed
/// by another statement is closed with `;` so the text parses back the same.
pub(crate) fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", statement)?;

        if matches!(statement, Statement::Expression(_)) && i + 1 < statements.len() {
            write!(f, ";")?;
        }
    }

    Ok(())
}
