use std::rc::Rc;

use crate::{Position, Span, MK_OPERATOR, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// On-demand scanner over a complete source string.
///
/// `ch` is the byte at `pos`; `read_pos` is the next byte to load. Once the
/// input is exhausted every call to [`Lexer::next_token`] yields `EOF`.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    pos: usize,
    read_pos: usize,
    ch: u8,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: 0,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = self.source.as_bytes().get(self.read_pos).copied().unwrap_or(0);
        self.pos = self.read_pos.min(self.source.len());
        if self.read_pos < self.source.len() {
            self.read_pos += 1;
        }
    }

    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.read_char();
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span {
            start: Position(start as u32, Rc::clone(&self.file)),
            end: Position(self.pos as u32, Rc::clone(&self.file)),
        }
    }

    pub fn peek_char(&self) -> u8 {
        self.source.as_bytes().get(self.read_pos).copied().unwrap_or(0)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.at_eof() && matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Produces the next token, consuming at least one character unless the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::new(), self.span_from(self.pos));
        }

        match self.ch {
            b'=' if self.peek_char() == b'=' => MK_OPERATOR!(self, TokenKind::Equals, "=="),
            b'=' => MK_OPERATOR!(self, TokenKind::Assignment, "="),
            b'!' if self.peek_char() == b'=' => MK_OPERATOR!(self, TokenKind::NotEquals, "!="),
            b'!' => MK_OPERATOR!(self, TokenKind::Not, "!"),
            b'+' => MK_OPERATOR!(self, TokenKind::Plus, "+"),
            b'-' => MK_OPERATOR!(self, TokenKind::Dash, "-"),
            b'*' => MK_OPERATOR!(self, TokenKind::Star, "*"),
            b'/' => MK_OPERATOR!(self, TokenKind::Slash, "/"),
            b'<' => MK_OPERATOR!(self, TokenKind::Less, "<"),
            b'>' => MK_OPERATOR!(self, TokenKind::Greater, ">"),
            b',' => MK_OPERATOR!(self, TokenKind::Comma, ","),
            b';' => MK_OPERATOR!(self, TokenKind::Semicolon, ";"),
            b'(' => MK_OPERATOR!(self, TokenKind::OpenParen, "("),
            b')' => MK_OPERATOR!(self, TokenKind::CloseParen, ")"),
            b'{' => MK_OPERATOR!(self, TokenKind::OpenCurly, "{"),
            b'}' => MK_OPERATOR!(self, TokenKind::CloseCurly, "}"),
            ch if is_letter(ch) => self.read_identifier(),
            ch if ch.is_ascii_digit() => self.read_number(),
            _ => self.read_illegal(),
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while !self.at_eof() && (is_letter(self.ch) || self.ch.is_ascii_digit()) {
            self.read_char();
        }

        let value = &self.source[start..self.pos];
        MK_TOKEN!(lookup_identifier(value), String::from(value), self.span_from(start))
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        while !self.at_eof() && self.ch.is_ascii_digit() {
            self.read_char();
        }

        MK_TOKEN!(
            TokenKind::Int,
            String::from(&self.source[start..self.pos]),
            self.span_from(start)
        )
    }

    // Consumes a whole character so multi-byte input never splits
    fn read_illegal(&mut self) -> Token {
        let start = self.pos;
        let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
        self.advance_n(width);

        MK_TOKEN!(
            TokenKind::Illegal,
            String::from(&self.source[start..self.pos]),
            self.span_from(start)
        )
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Scans `source` to completion, returning every token up to and including
/// the first `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
