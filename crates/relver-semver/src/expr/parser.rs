//! Recursive-descent parser for range expressions
//!
//! ```text
//! semver-expr      := "!" "(" semver-expr ")" | "(" semver-expr ")" | range
//!                     [ (AND | OR) semver-expr ]
//! range            := tilde-range | caret-range | wildcard-range
//!                   | hyphen-range | partial-version-range | comparison-range
//! comparison-range := [cmp-op] version
//! version          := major ["." minor ["." build ["." subBuild]]]
//! tilde-range      := "~" version
//! caret-range      := "^" version
//! wildcard-range   := "*" | major "." "*" | major "." minor "." "*"
//!                   | major "." minor "." build "." "*"
//! hyphen-range     := version "-" version
//! partial-range    := major ["." minor]
//! ```
//!
//! The range branch is chosen by peeking only; nothing is consumed until the
//! branch is known.

use super::expression::CompositeExpression;
use super::lexer::Lexer;
use super::operator::Operator;
use super::token::{Token, TokenType};
use super::token_stream::TokenStream;
use super::ExpressionError;
use crate::normal_version::NormalVersion;
use crate::version::Version;

/// How many tokens a digit run may span and still count as a partial version
pub const PARTIAL_VERSION_LOOKAHEAD: usize = 5;

type Result<T> = std::result::Result<T, ExpressionError>;

/// Parses range expressions such as `~1.2 | >=2.0.0.0 & <3`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParser {
    lexer: Lexer,
}

impl ExpressionParser {
    pub fn new() -> Self {
        ExpressionParser { lexer: Lexer::new() }
    }

    /// Parse a complete range expression
    pub fn parse(&self, input: &str) -> Result<CompositeExpression> {
        let tokens = self.lexer.tokenize(input)?;
        let mut grammar = Grammar { tokens };
        let expression = grammar.semver_expression()?;
        grammar.tokens.consume(&[TokenType::Eoi])?;
        log::debug!("Parsed range \"{}\" as {}", input, expression);
        Ok(expression)
    }
}

/// A numeric version component with the token it came from
struct Component {
    value: u64,
    token: Token,
}

struct Grammar {
    tokens: TokenStream,
}

impl Grammar {
    fn semver_expression(&mut self) -> Result<CompositeExpression> {
        let expression = if self.tokens.positive_lookahead(TokenType::Not) {
            self.tokens.consume(&[TokenType::Not])?;
            self.tokens.consume(&[TokenType::LeftParen])?;
            let inner = self.semver_expression()?;
            self.tokens.consume(&[TokenType::RightParen])?;
            CompositeExpression::not(inner)
        } else if self.tokens.positive_lookahead(TokenType::LeftParen) {
            self.tokens.consume(&[TokenType::LeftParen])?;
            let inner = self.semver_expression()?;
            self.tokens.consume(&[TokenType::RightParen])?;
            inner
        } else {
            self.range()?
        };
        self.more_expressions(expression)
    }

    fn more_expressions(&mut self, expression: CompositeExpression) -> Result<CompositeExpression> {
        if self.tokens.positive_lookahead(TokenType::And) {
            self.tokens.consume(&[TokenType::And])?;
            let rest = self.semver_expression()?;
            Ok(expression.and(rest))
        } else if self.tokens.positive_lookahead(TokenType::Or) {
            self.tokens.consume(&[TokenType::Or])?;
            let rest = self.semver_expression()?;
            Ok(expression.or(rest))
        } else {
            Ok(expression)
        }
    }

    fn range(&mut self) -> Result<CompositeExpression> {
        if self.tokens.positive_lookahead(TokenType::Tilde) {
            log::debug!("Selected tilde range at {}", self.tokens.lookahead());
            self.tilde_range()
        } else if self.tokens.positive_lookahead(TokenType::Caret) {
            log::debug!("Selected caret range at {}", self.tokens.lookahead());
            self.caret_range()
        } else if self.is_version_followed_by(TokenType::Wildcard) {
            log::debug!("Selected wildcard range at {}", self.tokens.lookahead());
            self.wildcard_range()
        } else if self.is_version_followed_by(TokenType::Hyphen) {
            log::debug!("Selected hyphen range at {}", self.tokens.lookahead());
            self.hyphen_range()
        } else if self.is_partial_version() {
            log::debug!("Selected partial version range at {}", self.tokens.lookahead());
            self.partial_version_range()
        } else {
            self.comparison_range()
        }
    }

    /// Does the run of NUMERIC and DOT tokens at the cursor end in `token_type`?
    fn is_version_followed_by(&self, token_type: TokenType) -> bool {
        self.tokens
            .iter()
            .find(|t| !t.is(TokenType::Numeric) && !t.is(TokenType::Dot))
            .is_some_and(|t| t.is(token_type))
    }

    fn is_partial_version(&self) -> bool {
        self.tokens.positive_lookahead(TokenType::Numeric)
            && self
                .tokens
                .positive_lookahead_until(PARTIAL_VERSION_LOOKAHEAD, &[TokenType::Wildcard, TokenType::Hyphen])
    }

    fn tilde_range(&mut self) -> Result<CompositeExpression> {
        self.tokens.consume(&[TokenType::Tilde])?;
        let components = self.version_components()?;
        band(&components, components.len() - 1)
    }

    fn caret_range(&mut self) -> Result<CompositeExpression> {
        self.tokens.consume(&[TokenType::Caret])?;
        let components = self.version_components()?;
        match components.iter().position(|c| c.value != 0) {
            Some(index) => band(&components, index),
            None => Ok(CompositeExpression::eq(Version::from(pad(&components)))),
        }
    }

    fn wildcard_range(&mut self) -> Result<CompositeExpression> {
        if self.tokens.positive_lookahead(TokenType::Wildcard) {
            self.tokens.consume(&[TokenType::Wildcard])?;
            return Ok(CompositeExpression::gte(Version::default()));
        }

        let mut components = Vec::new();
        loop {
            components.push(self.numeric()?);
            self.tokens.consume(&[TokenType::Dot])?;
            if components.len() == 3 || self.tokens.positive_lookahead(TokenType::Wildcard) {
                break;
            }
        }
        self.tokens.consume(&[TokenType::Wildcard])?;
        band(&components, components.len() - 1)
    }

    fn hyphen_range(&mut self) -> Result<CompositeExpression> {
        let lower = self.version()?;
        self.tokens.consume(&[TokenType::Hyphen])?;
        let upper = self.version()?;
        Ok(CompositeExpression::gte(lower).and(CompositeExpression::lte(upper)))
    }

    fn partial_version_range(&mut self) -> Result<CompositeExpression> {
        let mut components = vec![self.numeric()?];
        if self.tokens.positive_lookahead(TokenType::Dot) {
            self.tokens.consume(&[TokenType::Dot])?;
            components.push(self.numeric()?);
        }
        band(&components, components.len() - 1)
    }

    fn comparison_range(&mut self) -> Result<CompositeExpression> {
        let operator = if self.tokens.lookahead().token_type().is_comparison() {
            let token = self.tokens.consume(&[])?;
            Operator::from_token_type(token.token_type()).unwrap_or(Operator::Equal)
        } else {
            Operator::Equal
        };
        let version = self.version()?;
        Ok(CompositeExpression::compare(operator, version))
    }

    fn version(&mut self) -> Result<Version> {
        let components = self.version_components()?;
        Ok(Version::from(pad(&components)))
    }

    /// One to four dot-separated numeric components
    fn version_components(&mut self) -> Result<Vec<Component>> {
        let mut components = vec![self.numeric()?];
        while components.len() < 4 && self.tokens.positive_lookahead(TokenType::Dot) {
            self.tokens.consume(&[TokenType::Dot])?;
            components.push(self.numeric()?);
        }
        Ok(components)
    }

    fn numeric(&mut self) -> Result<Component> {
        let token = self.tokens.consume(&[TokenType::Numeric])?;
        let value = token
            .lexeme()
            .and_then(|lexeme| lexeme.parse().ok())
            .ok_or_else(|| overflow(&token))?;
        Ok(Component { value, token })
    }
}

/// `>=given & <given with component `index` bumped`
fn band(components: &[Component], index: usize) -> Result<CompositeExpression> {
    let lower = pad(components);
    let upper = lower
        .checked_increment(index)
        .ok_or_else(|| overflow(&components[index].token))?;
    Ok(CompositeExpression::gte(Version::from(lower)).and(CompositeExpression::lt(Version::from(upper))))
}

fn pad(components: &[Component]) -> NormalVersion {
    let mut parts = [0u64; 4];
    for (part, component) in parts.iter_mut().zip(components) {
        *part = component.value;
    }
    NormalVersion::from(parts)
}

fn overflow(token: &Token) -> ExpressionError {
    ExpressionError::NumericOverflow {
        lexeme: token.lexeme().unwrap_or_default().to_string(),
        position: token.position(),
    }
}
