//! Tokens of the range-expression language

use std::fmt;

/// Token categories produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Numeric,
    Dot,
    Hyphen,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Tilde,
    Wildcard,
    Caret,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    /// End of input
    Eoi,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Numeric => "NUMERIC",
            TokenType::Dot => "DOT",
            TokenType::Hyphen => "HYPHEN",
            TokenType::Equal => "EQUAL",
            TokenType::NotEqual => "NOT_EQUAL",
            TokenType::Greater => "GREATER",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::Less => "LESS",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::Tilde => "TILDE",
            TokenType::Wildcard => "WILDCARD",
            TokenType::Caret => "CARET",
            TokenType::And => "AND",
            TokenType::Or => "OR",
            TokenType::Not => "NOT",
            TokenType::LeftParen => "LEFT_PAREN",
            TokenType::RightParen => "RIGHT_PAREN",
            TokenType::Eoi => "EOI",
        }
    }

    /// Comparison operators that may prefix a version
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenType::Equal
                | TokenType::NotEqual
                | TokenType::Greater
                | TokenType::GreaterEqual
                | TokenType::Less
                | TokenType::LessEqual
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lexeme with its type and character offset in the source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    token_type: TokenType,
    lexeme: Option<String>,
    position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            token_type,
            lexeme: Some(lexeme.into()),
            position,
        }
    }

    /// The end-of-input sentinel; it carries no lexeme
    pub fn eoi(position: usize) -> Self {
        Token {
            token_type: TokenType::Eoi,
            lexeme: None,
            position,
        }
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{}(\"{}\") at position {}", self.token_type, lexeme, self.position),
            None => write!(f, "{} at position {}", self.token_type, self.position),
        }
    }
}
