use std::io::BufRead;

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Canonical end-of-line appended to every line pulled from the input.
pub const EOL: char = '\n';

/// Line-buffered character pump over a `BufRead` input.
///
/// The input is dropped as soon as it is exhausted, after which the next
/// `advance` is a `ReadPastEof` error.
pub struct SourceReader<R> {
    input: Option<R>,
    line: Vec<char>,
    col: usize,
    lineno: u32,
}

impl<R: BufRead> SourceReader<R> {
    pub fn new(input: R) -> Self {
        SourceReader {
            input: Some(input),
            line: vec![],
            col: 0,
            lineno: 0,
        }
    }

    /// Returns the next character, or `None` once the input is exhausted.
    pub fn advance(&mut self) -> Result<Option<char>, Error> {
        if self.is_exhausted() {
            return Err(self.error(ErrorImpl::ReadPastEof));
        }

        self.col += 1;
        if self.col >= self.line.len() && !self.refill()? {
            return Ok(None);
        }

        Ok(Some(self.line[self.col]))
    }

    fn refill(&mut self) -> Result<bool, Error> {
        let Some(input) = self.input.as_mut() else {
            return Ok(false);
        };

        let mut raw = Vec::new();
        let read = input.read_until(b'\n', &mut raw).map_err(|e| {
            Error::new(
                ErrorImpl::Io {
                    message: e.to_string(),
                },
                Position::new(self.lineno + 1, 1),
            )
        })?;

        self.col = 0;
        if read == 0 {
            debug!(lines = self.lineno, "source exhausted");
            self.input = None;
            self.line.clear();
            return Ok(false);
        }

        // Undecodable bytes become U+FFFD and are reported as illegal characters.
        let raw = String::from_utf8_lossy(&raw);
        let text = raw
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&raw);

        self.lineno += 1;
        self.line.clear();
        self.line.extend(text.chars());
        self.line.push(EOL);
        Ok(true)
    }

    pub fn is_exhausted(&self) -> bool {
        self.input.is_none()
    }

    /// Raw text of the current line, without the synthetic end-of-line.
    pub fn current_line(&self) -> String {
        match self.line.split_last() {
            Some((&EOL, text)) => text.iter().collect(),
            _ => self.line.iter().collect(),
        }
    }

    /// 1-based position of the character last returned by `advance`.
    pub fn position(&self) -> Position {
        Position::new(self.lineno, self.col as u32 + 1)
    }

    pub fn line_number(&self) -> u32 {
        self.lineno
    }

    /// Builds an error positioned at the current character.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.position()).with_source_line(self.current_line())
    }
}
