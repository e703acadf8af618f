//! Cursor over lexed tokens

use std::fmt;
use std::slice;

use thiserror::Error;

use super::token::{Token, TokenType};

/// A token that does not fit the grammar at its position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedToken {
    token: Token,
    expected: Vec<TokenType>,
}

impl UnexpectedToken {
    pub fn new(token: Token, expected: &[TokenType]) -> Self {
        UnexpectedToken {
            token,
            expected: expected.to_vec(),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn expected(&self) -> &[TokenType] {
        &self.expected
    }

    pub fn position(&self) -> usize {
        self.token.position()
    }
}

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = self.expected.iter().map(TokenType::as_str).collect();
        write!(f, "Unexpected {}, expecting [{}]", self.token, expected.join(", "))
    }
}

/// Tokens plus a read cursor. The last token is always EOI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenType::Eoi)) {
            let end = tokens
                .last()
                .map(|t| t.position() + t.lexeme().map_or(0, |l| l.chars().count()))
                .unwrap_or(0);
            tokens.push(Token::eoi(end));
        }
        TokenStream { tokens, cursor: 0 }
    }

    /// All tokens, consumed or not
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The next unconsumed token
    pub fn lookahead(&self) -> &Token {
        self.lookahead_nth(1)
    }

    /// The k-th unconsumed token (1-based); EOI once past the end
    pub fn lookahead_nth(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        let index = (self.cursor + k.max(1) - 1).min(last);
        &self.tokens[index]
    }

    pub fn positive_lookahead(&self, token_type: TokenType) -> bool {
        self.lookahead().is(token_type)
    }

    /// Scan at most `limit` tokens while they are NUMERIC or DOT. Returns
    /// whether the first other token is none of `excluded`; `false` when the
    /// window runs out first.
    pub fn positive_lookahead_until(&self, limit: usize, excluded: &[TokenType]) -> bool {
        for token in self.iter().take(limit) {
            match token.token_type() {
                TokenType::Numeric | TokenType::Dot => continue,
                other => return !excluded.contains(&other),
            }
        }
        false
    }

    /// Consume the next token if it has one of the `expected` types; an empty
    /// slice accepts any type. The cursor never moves past EOI.
    pub fn consume(&mut self, expected: &[TokenType]) -> Result<Token, UnexpectedToken> {
        let token = self.lookahead().clone();
        if !expected.is_empty() && !expected.contains(&token.token_type()) {
            return Err(UnexpectedToken::new(token, expected));
        }
        if !token.is(TokenType::Eoi) {
            self.cursor += 1;
        }
        Ok(token)
    }

    /// Iterate over the unconsumed tokens without advancing
    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens[self.cursor..].iter()
    }
}
