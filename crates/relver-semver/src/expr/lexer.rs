//! Regex-table lexer for range expressions

use lazy_static::lazy_static;
use regex::Regex;

use super::token::{Token, TokenType};
use super::token_stream::TokenStream;
use super::ExpressionError;

lazy_static! {
    /// Token patterns, tried in order at the current offset. Longer operators
    /// come before their prefixes so that `>=` never lexes as `>` `=`.
    static ref TOKEN_PATTERNS: Vec<(TokenType, Regex)> = [
        (TokenType::Numeric, r"^[0-9]+"),
        (TokenType::Dot, r"^\."),
        (TokenType::Hyphen, r"^-"),
        (TokenType::NotEqual, r"^!="),
        (TokenType::Equal, r"^="),
        (TokenType::GreaterEqual, r"^>="),
        (TokenType::Greater, r"^>"),
        (TokenType::LessEqual, r"^<="),
        (TokenType::Less, r"^<"),
        (TokenType::Tilde, r"^~"),
        (TokenType::Wildcard, r"^[*xX]"),
        (TokenType::Caret, r"^\^"),
        (TokenType::And, r"^(?:&&|&|AND|and)"),
        (TokenType::Or, r"^(?:\|\||\||OR|or)"),
        (TokenType::Not, r"^!"),
        (TokenType::LeftParen, r"^\("),
        (TokenType::RightParen, r"^\)"),
    ]
    .into_iter()
    .map(|(token_type, pattern)| (token_type, Regex::new(pattern).unwrap()))
    .collect();

    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
}

/// Splits a range expression into tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    /// Tokenize `input`, skipping whitespace. Positions are character
    /// offsets and the stream always ends with one EOI token.
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, ExpressionError> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut position = 0;

        while offset < input.len() {
            let rest = &input[offset..];
            if let Some(m) = WHITESPACE.find(rest) {
                offset += m.end();
                position += m.as_str().chars().count();
                continue;
            }

            let matched = TOKEN_PATTERNS
                .iter()
                .find_map(|(token_type, re)| re.find(rest).map(|m| (*token_type, m.as_str())));

            let Some((token_type, lexeme)) = matched else {
                let character = rest.chars().next().unwrap_or_default();
                return Err(ExpressionError::IllegalCharacter { character, position });
            };

            tokens.push(Token::new(token_type, lexeme, position));
            offset += lexeme.len();
            position += lexeme.chars().count();
        }
        tokens.push(Token::eoi(position));

        log::trace!("Tokenized \"{}\" into {} tokens", input, tokens.len());
        Ok(TokenStream::new(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(input: &str) -> Vec<TokenType> {
        Lexer::new()
            .tokenize(input)
            .unwrap()
            .tokens()
            .iter()
            .map(Token::token_type)
            .collect()
    }

    #[test]
    fn test_tokenize_comparison() {
        let stream = Lexer::new().tokenize(">1.0.0").unwrap();
        let expected = vec![
            Token::new(TokenType::Greater, ">", 0),
            Token::new(TokenType::Numeric, "1", 1),
            Token::new(TokenType::Dot, ".", 2),
            Token::new(TokenType::Numeric, "0", 3),
            Token::new(TokenType::Dot, ".", 4),
            Token::new(TokenType::Numeric, "0", 5),
            Token::eoi(6),
        ];
        assert_eq!(stream.tokens(), expected.as_slice());
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(
            Lexer::new().tokenize("@1.0.0").unwrap_err(),
            ExpressionError::IllegalCharacter { character: '@', position: 0 }
        );
        assert_eq!(
            Lexer::new().tokenize(">=1.0 $").unwrap_err(),
            ExpressionError::IllegalCharacter { character: '$', position: 6 }
        );
    }

    #[test]
    fn test_whitespace_keeps_absolute_positions() {
        let stream = Lexer::new().tokenize("  >=  1").unwrap();
        let tokens = stream.tokens();
        assert_eq!(tokens[0], Token::new(TokenType::GreaterEqual, ">=", 2));
        assert_eq!(tokens[1], Token::new(TokenType::Numeric, "1", 6));
        assert_eq!(tokens[2], Token::eoi(7));
    }

    #[test]
    fn test_whitespace_never_becomes_a_token() {
        let stream = Lexer::new().tokenize(" \t\n ").unwrap();
        assert_eq!(stream.tokens(), &[Token::eoi(4)]);
        assert_eq!(types(" 1 \t. 2 "), vec![TokenType::Numeric, TokenType::Dot, TokenType::Numeric, TokenType::Eoi]);
    }

    #[test]
    fn test_empty_input_is_just_eoi() {
        let stream = Lexer::new().tokenize("").unwrap();
        assert_eq!(stream.tokens(), &[Token::eoi(0)]);
    }

    #[test]
    fn test_maximal_munch_operators() {
        use TokenType::*;
        assert_eq!(
            types("= != > >= < <= ~ ^ * ( ) ! -"),
            vec![
                Equal, NotEqual, Greater, GreaterEqual, Less, LessEqual, Tilde, Caret, Wildcard, LeftParen,
                RightParen, Not, Hyphen, Eoi
            ]
        );
        assert_eq!(types("12345"), vec![Numeric, Eoi]);
    }

    #[test]
    fn test_logical_spellings() {
        use TokenType::*;
        assert_eq!(types("& && AND and"), vec![And, And, And, And, Eoi]);
        assert_eq!(types("| || OR or"), vec![Or, Or, Or, Or, Eoi]);
        assert_eq!(types("1.x 1.X 1.*"), vec![Numeric, Dot, Wildcard, Numeric, Dot, Wildcard, Numeric, Dot, Wildcard, Eoi]);
    }

    #[test]
    fn test_eoi_position_counts_characters() {
        let stream = Lexer::new().tokenize("1\u{3000}").unwrap();
        assert_eq!(stream.tokens().last(), Some(&Token::eoi(2)));
    }
}
