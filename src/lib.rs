#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// A 1-based line and column in the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

pub fn render_error(error: &Error, file: &str) -> String {
    /*
        Error: IllegalCharacter: illegal character '@'
        -> prog.c
           |
        20 | int a = @;
           | --------^
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!(
            "Error: {}: {}\n",
            error.get_error_name(),
            error.get_impl()
        ));
    } else {
        out.push_str(&format!(
            "Error: {}: {} ({})\n",
            error.get_error_name(),
            error.get_impl(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    if position.line == 0 {
        return out;
    }

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) =
        remove_starting_whitespace(error.get_source_line());
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
