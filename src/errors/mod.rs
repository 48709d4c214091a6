//! Error types and error handling for the front end.
//!
//! This module defines the syntax errors the parser records. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of syntax failure
//! - Helpful error messages and suggestions
//!
//! Lexical problems are not errors here: unrecognised characters travel
//! through the token stream as `Illegal` tokens.

pub mod errors;
