use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, info, trace};

use crate::{
    errors::errors::{DiagnosticSink, Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    source::{SourceReader, EOL},
    tokens::{Token, TokenKind},
};

/// Pull-based scanner producing one token per `next_token` call.
///
/// Recoverable errors go to the sink `S` and scanning carries on; only
/// fatal conditions (reading past end of file, I/O failure) come back as `Err`.
pub struct Scanner<R, S> {
    source: SourceReader<R>,
    /// Next unconsumed character, `None` at end of input.
    ch: Option<char>,
    sink: S,
    finished: bool,
}

impl<S: DiagnosticSink> Scanner<BufReader<File>, S> {
    pub fn open(path: impl AsRef<Path>, sink: S) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            debug!(error = %e, "failed to open source");
            Error::new(
                ErrorImpl::SourceNotFound {
                    path: path.display().to_string(),
                },
                Position::null(),
            )
        })?;

        info!(path = %path.display(), "begin scanning");
        Scanner::from_reader(BufReader::new(file), sink)
    }
}

impl<R: BufRead, S: DiagnosticSink> Scanner<R, S> {
    pub fn from_reader(reader: R, sink: S) -> Result<Self, Error> {
        let mut source = SourceReader::new(reader);
        let ch = source.advance()?;

        Ok(Scanner {
            source,
            ch,
            sink,
            finished: false,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Returns the next token. Once `Eof` has been returned every further
    /// call returns `Eof` again.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let token = self.scan()?;
        trace!(line = self.source.line_number(), %token, "token");
        Ok(token)
    }

    fn bump(&mut self) -> Result<(), Error> {
        self.ch = self.source.advance()?;
        Ok(())
    }

    fn report(&mut self, error_impl: ErrorImpl) {
        let error = self.source.error(error_impl);
        debug!(%error, "scan error");
        self.sink.report(error);
    }

    fn scan(&mut self) -> Result<Token, Error> {
        loop {
            match self.ch {
                Some(c) if is_letter(c) || c == '_' => {
                    let spelling = self.concat(|c| is_letter(c) || is_digit(c) || c == '_')?;
                    return Ok(Token::word(spelling));
                }
                Some(c) if is_digit(c) => {
                    let integer_part = self.concat(is_digit)?;
                    if self.ch != Some('.') {
                        return Ok(MK_TOKEN!(TokenKind::IntLiteral, integer_part));
                    }

                    self.bump()?;
                    if let Some(spelling) = self.scan_fraction(integer_part)? {
                        return Ok(MK_TOKEN!(TokenKind::DoubleLiteral, spelling));
                    }
                }
                Some('.') => {
                    self.bump()?;
                    if let Some(spelling) = self.scan_fraction(String::new())? {
                        return Ok(MK_TOKEN!(TokenKind::DoubleLiteral, spelling));
                    }
                }
                Some('\'') => {
                    if let Some(token) = self.scan_char_literal()? {
                        return Ok(token);
                    }
                }
                Some('"') => return self.scan_string_literal(),

                Some(' ' | '\t' | '\r' | EOL) => self.bump()?,

                Some('/') => {
                    self.bump()?;
                    match self.ch {
                        Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::DivAssign),
                        Some('*') => self.skip_block_comment()?,
                        Some('/') => self.skip_line_comment()?,
                        _ => return Ok(MK_TOKEN!(TokenKind::Divide)),
                    }
                }

                None => return Ok(MK_TOKEN!(TokenKind::Eof)),

                Some('+') => {
                    self.bump()?;
                    match self.ch {
                        Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::AddAssign),
                        Some('+') => MK_DEFAULT_HANDLER!(self, TokenKind::Increment),
                        _ => return Ok(MK_TOKEN!(TokenKind::Plus)),
                    }
                }
                Some('-') => {
                    self.bump()?;
                    match self.ch {
                        Some('=') => MK_DEFAULT_HANDLER!(self, TokenKind::SubAssign),
                        Some('-') => MK_DEFAULT_HANDLER!(self, TokenKind::Decrement),
                        _ => return Ok(MK_TOKEN!(TokenKind::Minus)),
                    }
                }
                Some('*') => {
                    return self.choose('=', TokenKind::Multiply, TokenKind::MultAssign)
                }
                Some('%') => {
                    return self.choose('=', TokenKind::Remainder, TokenKind::RemAssign)
                }

                Some('(') => MK_DEFAULT_HANDLER!(self, TokenKind::LeftParen),
                Some(')') => MK_DEFAULT_HANDLER!(self, TokenKind::RightParen),
                Some('[') => MK_DEFAULT_HANDLER!(self, TokenKind::LeftBracket),
                Some(']') => MK_DEFAULT_HANDLER!(self, TokenKind::RightBracket),
                Some('{') => MK_DEFAULT_HANDLER!(self, TokenKind::LeftBrace),
                Some('}') => MK_DEFAULT_HANDLER!(self, TokenKind::RightBrace),
                Some(':') => MK_DEFAULT_HANDLER!(self, TokenKind::Colon),
                Some(';') => MK_DEFAULT_HANDLER!(self, TokenKind::Semicolon),
                Some(',') => MK_DEFAULT_HANDLER!(self, TokenKind::Comma),

                Some('&') => {
                    if self.doubled('&')? {
                        return Ok(MK_TOKEN!(TokenKind::And));
                    }
                }
                Some('|') => {
                    if self.doubled('|')? {
                        return Ok(MK_TOKEN!(TokenKind::Or));
                    }
                }

                Some('=') => return self.choose('=', TokenKind::Assign, TokenKind::Equals),
                Some('<') => return self.choose('=', TokenKind::Less, TokenKind::LessEqual),
                Some('>') => return self.choose('=', TokenKind::Greater, TokenKind::GreaterEqual),
                Some('!') => return self.choose('=', TokenKind::Not, TokenKind::NotEqual),

                Some(c) => {
                    self.report(ErrorImpl::IllegalCharacter { ch: c });
                    self.bump()?;
                }
            }
        }
    }

    /// Consumes the maximal run of characters accepted by `accept`.
    fn concat(&mut self, accept: impl Fn(char) -> bool) -> Result<String, Error> {
        let mut run = String::new();
        while let Some(c) = self.ch.filter(|&c| accept(c)) {
            run.push(c);
            self.bump()?;
        }
        Ok(run)
    }

    /// Scans the digits after a consumed `.` and an optional exponent.
    ///
    /// A malformed exponent is reported and yields `None`; the scan then
    /// resumes at the character that broke the exponent.
    fn scan_fraction(&mut self, mut spelling: String) -> Result<Option<String>, Error> {
        spelling.push('.');
        spelling.push_str(&self.concat(is_digit)?);

        let Some(e @ ('e' | 'E')) = self.ch else {
            return Ok(Some(spelling));
        };
        spelling.push(e);
        self.bump()?;

        if let Some(sign @ ('+' | '-')) = self.ch {
            spelling.push(sign);
            self.bump()?;
        }

        let digits = self.concat(is_digit)?;
        if digits.is_empty() {
            self.report(ErrorImpl::MalformedExponent { found: self.ch });
            return Ok(None);
        }

        spelling.push_str(&digits);
        Ok(Some(spelling))
    }

    /// A char literal never spans a line: reaching the end of the line
    /// before its character is reported and the literal is dropped.
    fn scan_char_literal(&mut self) -> Result<Option<Token>, Error> {
        let mut spelling = String::from("'");
        self.bump()?;

        let Some(c) = self.line_char() else {
            return Ok(None);
        };
        spelling.push(c);
        self.bump()?;

        if c == '\\' {
            // Escape payload is taken verbatim.
            let Some(payload) = self.line_char() else {
                return Ok(None);
            };
            spelling.push(payload);
            self.bump()?;
        }

        if self.ch == Some('\'') {
            self.bump()?;
        } else {
            self.report(ErrorImpl::ExpectedCharacter {
                expected: '\'',
                found: self.ch,
            });
        }

        spelling.push('\'');
        Ok(Some(MK_TOKEN!(TokenKind::CharLiteral, spelling)))
    }

    /// The lookahead if it belongs to the current line, otherwise reports
    /// the missing closing quote.
    fn line_char(&mut self) -> Option<char> {
        match self.ch {
            Some(c) if c != EOL => Some(c),
            found => {
                self.report(ErrorImpl::ExpectedCharacter {
                    expected: '\'',
                    found,
                });
                None
            }
        }
    }

    fn scan_string_literal(&mut self) -> Result<Token, Error> {
        let mut spelling = String::from("\"");
        self.bump()?;

        loop {
            match self.ch {
                Some('"') => break,
                Some('\\') => {
                    spelling.push('\\');
                    self.bump()?;
                    if let Some(payload) = self.ch {
                        spelling.push(payload);
                    }
                    self.bump()?;
                }
                Some(c) => {
                    spelling.push(c);
                    self.bump()?;
                }
                // Unterminated: the pump reports reading past end of file.
                None => self.bump()?,
            }
        }

        spelling.push('"');
        self.bump()?;
        Ok(MK_TOKEN!(TokenKind::StringLiteral, spelling))
    }

    /// Skips `/* ... */`; the lookahead is on the opening `*`.
    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let start = self.source.line_number();
        self.bump()?;

        loop {
            while self.ch != Some('*') {
                self.bump()?;
            }
            self.bump()?;
            if self.ch == Some('/') {
                break;
            }
        }

        self.bump()?;
        trace!(from = start, to = self.source.line_number(), "skipped block comment");
        Ok(())
    }

    /// Skips `// ...` through the end of the line.
    fn skip_line_comment(&mut self) -> Result<(), Error> {
        while self.ch != Some(EOL) {
            self.bump()?;
        }
        self.bump()
    }

    /// Resolves a one-or-two character operator with one character of lookahead.
    fn choose(&mut self, next: char, one: TokenKind, two: TokenKind) -> Result<Token, Error> {
        self.bump()?;
        if self.ch != Some(next) {
            return Ok(MK_TOKEN!(one));
        }
        self.bump()?;
        Ok(MK_TOKEN!(two))
    }

    /// Consumes an operator that must be written twice (`&&`, `||`).
    ///
    /// A lone character is reported and dropped; the character after it is
    /// left as the lookahead.
    fn doubled(&mut self, c: char) -> Result<bool, Error> {
        self.bump()?;
        if self.ch == Some(c) {
            self.bump()?;
            return Ok(true);
        }

        self.report(ErrorImpl::ExpectedCharacter {
            expected: c,
            found: self.ch,
        });
        Ok(false)
    }
}

impl<R: BufRead, S: DiagnosticSink> Iterator for Scanner<R, S> {
    type Item = Result<Token, Error>;

    /// Yields every token including `Eof`, then stops. A fatal error also
    /// ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn tokenize<S: DiagnosticSink>(source: &str, sink: S) -> Result<Vec<Token>, Error> {
    Scanner::from_reader(source.as_bytes(), sink)?.collect()
}
