//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser keeps two buffered tokens, `current` and `peek`, pulled lazily
//! from the lexer; `advance` is the only way either of them changes.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer it reads from, the two-token cursor, the
/// errors recorded by the most recent parse and the handler tables.
pub struct Parser {
    /// Source of tokens, read one at a time
    lexer: Lexer,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Errors recorded during the most recent parse
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// The cursor is primed with two advances, so `current` holds the first
    /// token of the input and `peek` the second.
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            current: MK_TOKEN!(TokenKind::EOF, String::new(), Span::null()),
            peek: MK_TOKEN!(TokenKind::EOF, String::new(), Span::null()),
            errors: Vec::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser.advance();
        parser.advance();
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts `peek` into `current`, pulls a fresh token into `peek` and
    /// returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let previous = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.current, previous)
    }

    /// Advances past the lookahead token if it has the expected kind.
    ///
    /// # Returns
    ///
    /// Ok(Token) holding the new current token on a match. On a mismatch the
    /// cursor is left untouched and the error describing it is returned.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek.kind == expected_kind {
            self.advance();
            Ok(self.current.clone())
        } else {
            Err(self.peek_error(expected_kind))
        }
    }

    /// Builds the error for a lookahead token that is not `expected_kind`.
    pub fn peek_error(&self, expected_kind: TokenKind) -> Error {
        Error::new(
            ErrorImpl::UnexpectedPeek {
                expected: expected_kind,
                found: self.peek.to_string(),
            },
            self.peek.span.start.clone(),
        )
    }

    /// Binding power of the lookahead token, `Lowest` for non-operators.
    pub fn peek_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.peek.kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Binding power of the current token, `Lowest` for non-operators.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current.kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse contributes no node; its error is
    /// recorded and parsing resumes at the next token. Errors from any
    /// earlier call are discarded first.
    pub fn parse_program(&mut self) -> Program {
        self.errors.clear();

        let mut program = Program::default();

        while self.current_token_kind() != TokenKind::EOF {
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => self.record_error(error),
            }
            self.advance();
        }

        program
    }

    /// Records an error without abandoning the construct being parsed.
    pub fn record_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Errors recorded by the most recent [`Parser::parse_program`], in order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The recorded errors rendered as messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Hands the recorded errors to the caller, leaving the list empty.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }
}

/// A parsed program bundled with the errors recorded while parsing it.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<Error>,
}

impl ParseResult {
    /// True when no syntax error was recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }
}

/// Parses everything `lexer` produces into a Program.
///
/// This is the main entry point for parsing. The returned program may be
/// partial (or empty) when errors were recorded; it never fails outright.
pub fn parse(lexer: Lexer) -> ParseResult {
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    ParseResult {
        program,
        errors: parser.take_errors(),
    }
}
