use std::fmt::Display;

use thiserror::Error;
use tracing::debug;

use crate::{render_error, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    source_line: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            source_line: String::new(),
        }
    }

    /// Attaches the raw source line the error was detected on.
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = line.into();
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_source_line(&self) -> &str {
        &self.source_line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Fatal errors end the scan; everything else is reported and recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::ReadPastEof | ErrorImpl::SourceNotFound { .. } | ErrorImpl::Io { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::ExpectedCharacter { .. } => "ExpectedCharacter",
            ErrorImpl::MalformedExponent { .. } => "MalformedExponent",
            ErrorImpl::ReadPastEof => "ReadPastEof",
            ErrorImpl::SourceNotFound { .. } => "SourceNotFound",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => ErrorTip::None,
            ErrorImpl::ExpectedCharacter { expected, found } => ErrorTip::Suggestion(format!(
                "Expected `{}`, found {}",
                expected,
                describe(*found)
            )),
            ErrorImpl::MalformedExponent { found } => ErrorTip::Suggestion(format!(
                "Exponent needs `+`, `-` or a digit, found {}",
                describe(*found)
            )),
            ErrorImpl::ReadPastEof => ErrorTip::Suggestion(String::from(
                "Is a comment or literal left unterminated?",
            )),
            ErrorImpl::SourceNotFound { path } => {
                ErrorTip::Suggestion(format!("File not found: {}", path))
            }
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.column, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

fn describe(ch: Option<char>) -> String {
    match ch {
        Some('\n') => String::from("end of line"),
        Some(ch) => format!("`{}`", ch),
        None => String::from("end of file"),
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("illegal character {ch:?}")]
    IllegalCharacter { ch: char },
    #[error("illegal character, expecting {expected:?}")]
    ExpectedCharacter { expected: char, found: Option<char> },
    #[error("illegal character, expecting +, -, digits")]
    MalformedExponent { found: Option<char> },
    #[error("attempt to read past end of file")]
    ReadPastEof,
    #[error("file not found: {path}")]
    SourceNotFound { path: String },
    #[error("error reading source: {message}")]
    Io { message: String },
}

/// Receives the recoverable errors a scan runs into.
pub trait DiagnosticSink {
    fn report(&mut self, error: Error);
}

impl DiagnosticSink for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, error: Error) {
        (**self).report(error);
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _error: Error) {}
}

/// Renders diagnostics to stderr with the offending line and a caret.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    file: String,
    reported: usize,
}

impl ConsoleSink {
    pub fn new(file: impl Into<String>) -> Self {
        ConsoleSink {
            file: file.into(),
            reported: 0,
        }
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, error: Error) {
        debug!(
            line = error.get_position().line,
            column = error.get_position().column,
            "{}",
            error.get_impl()
        );
        self.reported += 1;
        eprintln!("{}", render_error(&error, &self.file));
    }
}
