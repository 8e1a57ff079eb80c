//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Consumes the lookahead and returns a fixed token
//!
//! These macros reduce boilerplate in the scanner's dispatch loop.

/// Creates a Token instance.
///
/// With only a kind the token carries no spelling (keywords, punctuation,
/// operators). With a spelling the text is stored verbatim.
///
/// # Example
///
/// ```ignore
/// let plus = MK_TOKEN!(TokenKind::Plus);
/// let number = MK_TOKEN!(TokenKind::IntLiteral, String::from("42"));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            spelling: None,
        }
    };
    ($kind:expr, $spelling:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            spelling: Some($spelling),
        }
    };
}

/// Handles a single-character token: advances past the lookahead and
/// returns the token from the enclosing function.
///
/// Must be used inside a scanner method returning `Result<Token, Error>`.
///
/// # Example
///
/// ```ignore
/// Some(';') => MK_DEFAULT_HANDLER!(self, TokenKind::Semicolon),
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($scanner:expr, $kind:expr) => {{
        $scanner.bump()?;
        return Ok($crate::MK_TOKEN!($kind));
    }};
}
