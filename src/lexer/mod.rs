//! Lexical analysis module.
//!
//! This module contains the lexer (scanner) that converts source code
//! into tokens for parsing. It handles:
//!
//! - On-demand scanning, one token per call
//! - Recognition of keywords, identifiers, integers and operators
//! - Token position tracking for error reporting
//! - Unrecognised characters, reported as `Illegal` tokens

pub mod lexer;
pub mod tokens;
