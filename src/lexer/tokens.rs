use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::MK_TOKEN;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("const", TokenKind::Const);
        map.insert("void", TokenKind::Void);
        map.insert("else", TokenKind::Else);
        map.insert("if", TokenKind::If);
        map.insert("int", TokenKind::Int);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("char", TokenKind::Char);
        map.insert("double", TokenKind::Double);
        map.insert("for", TokenKind::For);
        map.insert("do", TokenKind::Do);
        map.insert("goto", TokenKind::Goto);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("break", TokenKind::Break);
        map.insert("default", TokenKind::Default);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,

    // Reserved
    Const,
    Void,
    Else,
    If,
    Int,
    While,
    Return,
    Char,
    Double,
    For,
    Do,
    Goto,
    Switch,
    Case,
    Break,
    Default,

    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
    Colon,

    Assign,       // =
    Equals,       // ==
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    Not,          // !
    NotEqual,     // !=

    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    Increment, // ++
    Decrement, // --

    AddAssign,
    SubAssign,
    MultAssign,
    DivAssign,
    RemAssign,

    And, // &&
    Or,  // ||

    Identifier,
    IntLiteral,
    CharLiteral,
    StringLiteral,
    DoubleLiteral,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    /// Whether tokens of this kind carry their source spelling.
    pub fn carries_spelling(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::DoubleLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Maps a scanned word to its keyword kind, or `Identifier` when it is not reserved.
pub fn classify(spelling: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(spelling)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: Option<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.spelling {
            Some(spelling) => write!(f, "{} ({})", self.kind, spelling),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Token {
    /// Builds the token for an identifier-shaped word, resolving keywords.
    pub fn word(spelling: String) -> Token {
        match classify(&spelling) {
            TokenKind::Identifier => MK_TOKEN!(TokenKind::Identifier, spelling),
            keyword => MK_TOKEN!(keyword),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
