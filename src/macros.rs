//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_OPERATOR!` - Consumes a fixed operator lexeme and creates its token
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Consumes a fixed operator lexeme from the lexer and creates its token.
///
/// The lexeme's length decides how many characters are consumed, so the same
/// macro serves both `=` and `==`.
///
/// # Example
///
/// ```ignore
/// b'=' if lexer.peek_char() == b'=' => MK_OPERATOR!(lexer, TokenKind::Equals, "=="),
/// ```
#[macro_export]
macro_rules! MK_OPERATOR {
    ($lexer:expr, $kind:expr, $value:literal) => {{
        let start = $lexer.position();
        $lexer.advance_n($value.len());
        $crate::MK_TOKEN!($kind, String::from($value), $lexer.span_from(start))
    }};
}
