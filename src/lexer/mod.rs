//! Lexical analysis module.
//!
//! Converts a source character stream into tokens one at a time. It handles:
//!
//! - Line-buffered character input with one character of lookahead
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line and block comment skipping
//! - Line/column tracked error reporting with recovery

pub mod lexer;
pub mod source;
pub mod tokens;
