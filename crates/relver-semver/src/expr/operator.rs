//! Comparison operators of range expressions

use std::fmt;

use super::token::TokenType;
use crate::version::Version;

/// Comparison operators for version ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
}

impl Operator {
    /// Map a comparison token to its operator
    pub fn from_token_type(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Equal => Some(Operator::Equal),
            TokenType::NotEqual => Some(Operator::NotEqual),
            TokenType::Greater => Some(Operator::GreaterThan),
            TokenType::GreaterEqual => Some(Operator::GreaterThanOrEqual),
            TokenType::Less => Some(Operator::LessThan),
            TokenType::LessEqual => Some(Operator::LessThanOrEqual),
            _ => None,
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
        }
    }

    /// Compare `version` against `operand` in precedence order
    pub fn evaluate(&self, version: &Version, operand: &Version) -> bool {
        match self {
            Operator::Equal => version == operand,
            Operator::NotEqual => version != operand,
            Operator::GreaterThan => version > operand,
            Operator::GreaterThanOrEqual => version >= operand,
            Operator::LessThan => version < operand,
            Operator::LessThanOrEqual => version <= operand,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
