//! The range-expression language: lexing, parsing and evaluation

mod expression;
mod lexer;
mod operator;
mod parser;
mod token;
mod token_stream;


use thiserror::Error;

pub use expression::{CompositeExpression, Expression};
pub use lexer::Lexer;
pub use operator::Operator;
pub use parser::{ExpressionParser, PARTIAL_VERSION_LOOKAHEAD};
pub use token::{Token, TokenType};
pub use token_stream::{TokenStream, UnexpectedToken};

/// Error type for range expression lexing and parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Illegal character '{character}' at position {position}")]
    IllegalCharacter { character: char, position: usize },
    #[error(transparent)]
    UnexpectedToken(#[from] UnexpectedToken),
    #[error("Version component \"{lexeme}\" at position {position} is out of range")]
    NumericOverflow { lexeme: String, position: usize },
}

impl ExpressionError {
    /// Character offset in the source where parsing failed
    pub fn position(&self) -> usize {
        match self {
            ExpressionError::IllegalCharacter { position, .. } => *position,
            ExpressionError::UnexpectedToken(e) => e.position(),
            ExpressionError::NumericOverflow { position, .. } => *position,
        }
    }
}
