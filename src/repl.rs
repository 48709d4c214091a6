//! Line-oriented interactive driver.
//!
//! Each input line gets a fresh lexer (and parser). Depending on the
//! configured [`Mode`] the line is either drained into raw tokens or parsed
//! and rendered back as a program.

use std::{
    io::{self, BufRead, Write},
    time::Instant,
};

use crate::{
    format_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::parse,
};

pub const PROMPT: &str = ">> ";

pub const USAGE: &str = "usage: simply [--tokens] [--timings]";

/// Source name used in diagnostics for interactive input.
const SHELL: &str = "shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Print the tokens of every line
    Tokens,
    /// Parse every line and print the rendered program or its errors
    #[default]
    Ast,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub mode: Mode,
    /// Print how long scanning/parsing took for every line
    pub timings: bool,
}

impl Config {
    /// Builds a config from command-line arguments (program name excluded).
    ///
    /// Returns the first unrecognised argument as the error.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Config, String> {
        let mut config = Config::default();

        for arg in args {
            match arg.as_str() {
                "--tokens" => config.mode = Mode::Tokens,
                "--ast" => config.mode = Mode::Ast,
                "--timings" => config.timings = true,
                _ => return Err(arg),
            }
        }

        Ok(config)
    }
}

/// Runs the read-eval-print loop until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, config: &Config) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let source = line.trim_end_matches(|c| c == '\n' || c == '\r');
        match config.mode {
            Mode::Tokens => print_tokens(source, &mut output, config)?,
            Mode::Ast => print_program(source, &mut output, config)?,
        }
    }
}

fn print_tokens<W: Write>(source: &str, output: &mut W, config: &Config) -> io::Result<()> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), None);

    if config.timings {
        writeln!(output, "Tokenized in {:?}", start.elapsed())?;
    }

    for token in tokens.iter().filter(|token| token.kind != TokenKind::EOF) {
        writeln!(output, "{}", token)?;
    }

    Ok(())
}

fn print_program<W: Write>(source: &str, output: &mut W, config: &Config) -> io::Result<()> {
    let start = Instant::now();
    let result = parse(Lexer::new(source.to_string(), None));

    if config.timings {
        writeln!(output, "Parsed in {:?}", start.elapsed())?;
    }

    if let Some(first) = result.errors.first() {
        writeln!(output, "parser errors:")?;
        for message in result.error_messages() {
            writeln!(output, "\t{}", message)?;
        }
        write!(output, "{}", format_error(first, source, SHELL))?;
        return Ok(());
    }

    if !result.program.is_empty() {
        writeln!(output, "{}", result.program)?;
    }

    Ok(())
}
