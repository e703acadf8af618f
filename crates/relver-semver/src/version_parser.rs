//! Character-level parser for version literals
//!
//! The grammar is
//!
//! ```text
//! version     := digits "." digits "." digits "." digits ["-" pre-release] ["+" build]
//! pre-release := identifier ("." identifier)*
//! build       := identifier ("." identifier)*
//! identifier  := (digit | letter | "-")+
//! ```
//!
//! Every character is classified into a [`CharType`] and the parser only ever
//! looks ahead before consuming, so a failure reports the exact character,
//! its position and the set of character classes that were acceptable there.

use std::fmt;
use std::iter;

use thiserror::Error;

use crate::metadata::MetadataVersion;
use crate::normal_version::NormalVersion;
use crate::version::Version;

/// Character classes recognised by the version literal grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Digit,
    Letter,
    Dot,
    Hyphen,
    Plus,
    /// End of input
    Eoi,
    Illegal,
}

impl CharType {
    /// Classify a character; `None` stands for the end of input
    pub fn of(c: Option<char>) -> CharType {
        match c {
            None => CharType::Eoi,
            Some(c) if c.is_ascii_digit() => CharType::Digit,
            Some(c) if c.is_ascii_alphabetic() => CharType::Letter,
            Some('.') => CharType::Dot,
            Some('-') => CharType::Hyphen,
            Some('+') => CharType::Plus,
            Some(_) => CharType::Illegal,
        }
    }

    pub fn is_matched_by(self, c: Option<char>) -> bool {
        CharType::of(c) == self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharType::Digit => "DIGIT",
            CharType::Letter => "LETTER",
            CharType::Dot => "DOT",
            CharType::Hyphen => "HYPHEN",
            CharType::Plus => "PLUS",
            CharType::Eoi => "EOI",
            CharType::Illegal => "ILLEGAL",
        }
    }
}

impl fmt::Display for CharType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn describe_char(c: &Option<char>) -> String {
    match c {
        Some(c) => format!("character '{}'", c),
        None => "end of input".to_string(),
    }
}

fn join_char_types(types: &[CharType]) -> String {
    types.iter().map(CharType::as_str).collect::<Vec<_>>().join(", ")
}

/// A character that does not fit the grammar at its position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected {} at position {position}, expecting [{}]", describe_char(.unexpected), join_char_types(.expected))]
pub struct UnexpectedCharacter {
    unexpected: Option<char>,
    position: usize,
    expected: Vec<CharType>,
}

impl UnexpectedCharacter {
    pub fn new(unexpected: Option<char>, position: usize, expected: &[CharType]) -> Self {
        UnexpectedCharacter {
            unexpected,
            position,
            expected: expected.to_vec(),
        }
    }

    /// The offending character, `None` when the input ended early
    pub fn unexpected(&self) -> Option<char> {
        self.unexpected
    }

    /// 0-based character offset of the failure
    pub fn position(&self) -> usize {
        self.position
    }

    /// Character classes that would have been accepted
    pub fn expected(&self) -> &[CharType] {
        &self.expected
    }
}

/// Error type for version literal parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParserError {
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
    #[error("Identifiers MUST NOT be empty: {0}")]
    EmptyIdentifier(UnexpectedCharacter),
    #[error("Numeric identifier MUST NOT contain leading zeroes (at position {position})")]
    LeadingZero { position: usize },
    #[error("Numeric identifier \"{digits}\" at position {position} is too large")]
    NumericOverflow { digits: String, position: usize },
}

impl VersionParserError {
    /// The character diagnostic behind this error, if there is one
    pub fn unexpected_character(&self) -> Option<&UnexpectedCharacter> {
        match self {
            VersionParserError::UnexpectedCharacter(e) | VersionParserError::EmptyIdentifier(e) => Some(e),
            _ => None,
        }
    }
}

type Result<T> = std::result::Result<T, VersionParserError>;

/// Cursor over the characters of one literal plus the grammar rules
struct Scanner {
    chars: Vec<char>,
    offset: usize,
    strict: bool,
}

impl Scanner {
    fn new(input: &str, strict: bool) -> Self {
        Scanner {
            chars: input.chars().collect(),
            offset: 0,
            strict,
        }
    }

    fn lookahead(&self, k: usize) -> Option<char> {
        self.chars.get(self.offset + k - 1).copied()
    }

    fn positive_lookahead(&self, expected: &[CharType]) -> bool {
        let next = self.lookahead(1);
        expected.iter().any(|t| t.is_matched_by(next))
    }

    /// Is any of `expected` found before the first `before` character?
    fn positive_lookahead_before(&self, before: CharType, expected: &[CharType]) -> bool {
        let remaining = self.chars[self.offset..].iter().copied().map(Some).chain(iter::once(None));
        for c in remaining {
            if before.is_matched_by(c) {
                break;
            }
            if expected.iter().any(|t| t.is_matched_by(c)) {
                return true;
            }
        }
        false
    }

    fn nearest_char_type(&self, types: &[CharType]) -> CharType {
        for &c in &self.chars[self.offset..] {
            if let Some(t) = types.iter().find(|t| t.is_matched_by(Some(c))) {
                return *t;
            }
        }
        CharType::Eoi
    }

    fn unexpected(&self, expected: &[CharType]) -> UnexpectedCharacter {
        UnexpectedCharacter::new(self.lookahead(1), self.offset, expected)
    }

    fn consume(&mut self, expected: &[CharType]) -> Result<Option<char>> {
        if !self.positive_lookahead(expected) {
            return Err(self.unexpected(expected).into());
        }
        let next = self.lookahead(1);
        if next.is_some() {
            self.offset += 1;
        }
        Ok(next)
    }

    fn ensure_valid_lookahead(&self, expected: &[CharType]) -> Result<()> {
        if self.positive_lookahead(expected) {
            Ok(())
        } else {
            Err(self.unexpected(expected).into())
        }
    }

    fn version(&mut self) -> Result<Version> {
        let normal = self.version_core()?;
        let mut pre_release = None;
        let mut build = None;

        let next = self.consume(&[CharType::Hyphen, CharType::Plus, CharType::Eoi])?;
        if CharType::Hyphen.is_matched_by(next) {
            pre_release = Some(self.pre_release()?);
            let next = self.consume(&[CharType::Plus, CharType::Eoi])?;
            if CharType::Plus.is_matched_by(next) {
                build = Some(self.build()?);
            }
        } else if CharType::Plus.is_matched_by(next) {
            build = Some(self.build()?);
        }
        self.consume(&[CharType::Eoi])?;

        Ok(Version::from_parts(normal, pre_release, build))
    }

    fn version_core(&mut self) -> Result<NormalVersion> {
        let major = self.numeric_component()?;
        self.consume(&[CharType::Dot])?;
        let minor = self.numeric_component()?;
        self.consume(&[CharType::Dot])?;
        let build = self.numeric_component()?;
        self.consume(&[CharType::Dot])?;
        let sub_build = self.numeric_component()?;
        Ok(NormalVersion::new(major, minor, build, sub_build))
    }

    fn numeric_component(&mut self) -> Result<u64> {
        let position = self.offset;
        let digits = self.numeric_identifier()?;
        digits
            .parse()
            .map_err(|_| VersionParserError::NumericOverflow { digits, position })
    }

    fn pre_release(&mut self) -> Result<MetadataVersion> {
        self.ensure_valid_lookahead(&[CharType::Digit, CharType::Letter, CharType::Hyphen])?;
        let mut identifiers = Vec::new();
        loop {
            identifiers.push(self.pre_release_identifier()?);
            if !self.positive_lookahead(&[CharType::Dot]) {
                break;
            }
            self.consume(&[CharType::Dot])?;
        }
        Ok(MetadataVersion::new(identifiers))
    }

    fn pre_release_identifier(&mut self) -> Result<String> {
        self.check_for_empty_identifier()?;
        let boundary = self.nearest_char_type(&[CharType::Dot, CharType::Plus, CharType::Eoi]);
        if self.positive_lookahead_before(boundary, &[CharType::Letter, CharType::Hyphen]) {
            self.alphanumeric_identifier()
        } else {
            self.numeric_identifier()
        }
    }

    fn build(&mut self) -> Result<MetadataVersion> {
        self.ensure_valid_lookahead(&[CharType::Digit, CharType::Letter, CharType::Hyphen])?;
        let mut identifiers = Vec::new();
        loop {
            identifiers.push(self.build_identifier()?);
            if !self.positive_lookahead(&[CharType::Dot]) {
                break;
            }
            self.consume(&[CharType::Dot])?;
        }
        Ok(MetadataVersion::new(identifiers))
    }

    // Build identifiers may keep leading zeroes.
    fn build_identifier(&mut self) -> Result<String> {
        self.check_for_empty_identifier()?;
        let boundary = self.nearest_char_type(&[CharType::Dot, CharType::Eoi]);
        if self.positive_lookahead_before(boundary, &[CharType::Letter, CharType::Hyphen]) {
            self.alphanumeric_identifier()
        } else {
            self.digits()
        }
    }

    fn numeric_identifier(&mut self) -> Result<String> {
        if self.strict {
            self.check_for_leading_zeros()?;
        }
        self.digits()
    }

    fn alphanumeric_identifier(&mut self) -> Result<String> {
        let allowed = [CharType::Digit, CharType::Letter, CharType::Hyphen];
        let mut identifier = String::new();
        loop {
            if let Some(c) = self.consume(&allowed)? {
                identifier.push(c);
            }
            if !self.positive_lookahead(&allowed) {
                break;
            }
        }
        Ok(identifier)
    }

    fn digits(&mut self) -> Result<String> {
        let mut digits = String::new();
        loop {
            if let Some(c) = self.consume(&[CharType::Digit])? {
                digits.push(c);
            }
            if !self.positive_lookahead(&[CharType::Digit]) {
                break;
            }
        }
        Ok(digits)
    }

    fn check_for_leading_zeros(&self) -> Result<()> {
        if self.lookahead(1) == Some('0') && CharType::Digit.is_matched_by(self.lookahead(2)) {
            return Err(VersionParserError::LeadingZero { position: self.offset });
        }
        Ok(())
    }

    fn check_for_empty_identifier(&self) -> Result<()> {
        if self.positive_lookahead(&[CharType::Dot, CharType::Plus, CharType::Eoi]) {
            let expected = [CharType::Digit, CharType::Letter, CharType::Hyphen];
            return Err(VersionParserError::EmptyIdentifier(self.unexpected(&expected)));
        }
        Ok(())
    }

    fn finish<T>(mut self, value: T) -> Result<T> {
        self.consume(&[CharType::Eoi])?;
        Ok(value)
    }
}

/// Parser for `major.minor.build.subBuild[-pre-release][+build]` literals
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    /// Create a new version parser
    pub fn new() -> Self {
        VersionParser
    }

    /// Parse a literal, accepting numeric identifiers with leading zeroes
    pub fn parse(&self, input: &str) -> Result<Version> {
        let version = Scanner::new(input, false).version()?;
        log::trace!("Parsed version literal \"{}\" as {}", input, version);
        Ok(version)
    }

    /// Parse a literal, also rejecting numeric identifiers with leading zeroes
    pub fn parse_valid(&self, input: &str) -> Result<Version> {
        Scanner::new(input, true).version()
    }

    /// Check whether a literal passes [`VersionParser::parse_valid`]
    pub fn is_valid(&self, input: &str) -> bool {
        self.parse_valid(input).is_ok()
    }

    /// Parse only the four numeric components
    pub fn parse_version_core(&self, input: &str) -> Result<NormalVersion> {
        let mut scanner = Scanner::new(input, true);
        let normal = scanner.version_core()?;
        scanner.finish(normal)
    }

    /// Parse a pre-release identifier list such as `rc.1`
    pub fn parse_pre_release(&self, input: &str) -> Result<MetadataVersion> {
        let mut scanner = Scanner::new(input, true);
        let pre_release = scanner.pre_release()?;
        scanner.finish(pre_release)
    }

    /// Parse a build metadata identifier list such as `build.5`
    pub fn parse_build(&self, input: &str) -> Result<MetadataVersion> {
        let mut scanner = Scanner::new(input, true);
        let build = scanner.build()?;
        scanner.finish(build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharType::{Digit, Dot, Eoi, Hyphen, Letter, Plus};

    #[test]
    fn test_parse_full_literal() {
        let v = VersionParser::new().parse_valid("1.0.0.0-rc.1+build.1").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.build(), 0);
        assert_eq!(v.sub_build(), 0);
        assert_eq!(v.pre_release_version().as_deref(), Some("rc.1"));
        assert_eq!(v.build_metadata().as_deref(), Some("build.1"));
    }

    #[test]
    fn test_parse_build_without_pre_release() {
        let v = VersionParser::new().parse_valid("1.2.3.0+build").unwrap();
        assert_eq!(v.pre_release_version(), None);
        assert_eq!(v.build_metadata().as_deref(), Some("build"));
    }

    #[test]
    fn test_hyphens_inside_identifiers() {
        let v = VersionParser::new().parse_valid("1.2.3.4-x-y-z.--").unwrap();
        assert_eq!(v.pre_release_version().as_deref(), Some("x-y-z.--"));
    }

    #[test]
    fn test_error_diagnostics() {
        let cases: &[(&str, Option<char>, usize, &[CharType])] = &[
            ("1", None, 1, &[Dot]),
            ("1 ", Some(' '), 1, &[Dot]),
            ("1.", None, 2, &[Digit]),
            ("1.2", None, 3, &[Dot]),
            ("1.2.", None, 4, &[Digit]),
            ("a.b.c", Some('a'), 0, &[Digit]),
            ("1.b.c", Some('b'), 2, &[Digit]),
            ("1.2.c", Some('c'), 4, &[Digit]),
            ("!.2.3", Some('!'), 0, &[Digit]),
            ("v1.2.3", Some('v'), 0, &[Digit]),
            ("1.2. 3", Some(' '), 4, &[Digit]),
            ("1.2.3-", Some('-'), 5, &[Dot]),
            ("1.2.3+b1+b2", Some('+'), 5, &[Dot]),
            ("1.2.3.4=alpha", Some('='), 7, &[Hyphen, Plus, Eoi]),
            ("1.2.3.4~beta", Some('~'), 7, &[Hyphen, Plus, Eoi]),
            ("1.2.3.4-be$ta", Some('$'), 10, &[Plus, Eoi]),
            ("1.2.3.4+b1+b2", Some('+'), 10, &[Eoi]),
            ("1.2.3.4-rc!", Some('!'), 10, &[Plus, Eoi]),
            ("1.2.3.4-+", Some('+'), 8, &[Digit, Letter, Hyphen]),
            ("1.2.3.4-@", Some('@'), 8, &[Digit, Letter, Hyphen]),
            ("1.2.3.4+@", Some('@'), 8, &[Digit, Letter, Hyphen]),
            ("1.2.3.4-rc.", None, 11, &[Digit, Letter, Hyphen]),
            ("1.2.3.4+b.", None, 10, &[Digit, Letter, Hyphen]),
            ("1.2.3.4-b.+b", Some('+'), 10, &[Digit, Letter, Hyphen]),
            ("1.2.3.4-rc..", Some('.'), 11, &[Digit, Letter, Hyphen]),
            ("1.2.3.4-a+b..", Some('.'), 12, &[Digit, Letter, Hyphen]),
        ];

        let parser = VersionParser::new();
        for (input, unexpected, position, expected) in cases {
            let err = parser.parse_valid(input).unwrap_err();
            let diagnostic = err
                .unexpected_character()
                .unwrap_or_else(|| panic!("no character diagnostic for {:?}: {}", input, err));
            assert_eq!(diagnostic.unexpected(), *unexpected, "input {:?}", input);
            assert_eq!(diagnostic.position(), *position, "input {:?}", input);
            assert_eq!(diagnostic.expected(), *expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_empty_identifier_is_reported_as_such() {
        let err = VersionParser::new().parse("1.2.3.4-rc..").unwrap_err();
        assert!(matches!(err, VersionParserError::EmptyIdentifier(_)));
    }

    #[test]
    fn test_leading_zeroes() {
        let parser = VersionParser::new();
        assert_eq!(
            parser.parse_valid("01.2.3.4").unwrap_err(),
            VersionParserError::LeadingZero { position: 0 }
        );
        assert_eq!(
            parser.parse_valid("1.2.3.4-rc.01").unwrap_err(),
            VersionParserError::LeadingZero { position: 11 }
        );

        // Lenient parsing and build metadata accept them.
        assert_eq!(parser.parse("01.2.3.4").unwrap().to_string(), "1.2.3.4");
        assert!(parser.parse("1.2.3.4-rc.01").is_ok());
        assert!(parser.parse_valid("1.2.3.4+007").is_ok());
        assert!(parser.parse_valid("1.2.3.4-0a").is_ok());
    }

    #[test]
    fn test_numeric_overflow() {
        let err = VersionParser::new().parse("1.99999999999999999999999.0.0").unwrap_err();
        assert_eq!(
            err,
            VersionParserError::NumericOverflow {
                digits: "99999999999999999999999".to_string(),
                position: 2,
            }
        );
    }

    #[test]
    fn test_partial_entry_points() {
        let parser = VersionParser::new();
        assert_eq!(parser.parse_version_core("1.2.3.4").unwrap(), NormalVersion::new(1, 2, 3, 4));
        assert_eq!(parser.parse_pre_release("alpha.1").unwrap().to_string(), "alpha.1");
        assert_eq!(parser.parse_build("build.007").unwrap().to_string(), "build.007");

        let err = parser.parse_pre_release("").unwrap_err();
        let diagnostic = err.unexpected_character().unwrap();
        assert_eq!(diagnostic.unexpected(), None);
        assert_eq!(diagnostic.expected(), &[Digit, Letter, Hyphen]);

        assert!(parser.parse_version_core("1.2.3.4-rc").is_err());
        assert!(parser.parse_build("a+b").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = VersionParser::new().parse("1").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected end of input at position 1, expecting [DOT]");
    }

    #[test]
    fn test_is_valid() {
        let parser = VersionParser::new();
        assert!(parser.is_valid("0.0.0.0"));
        assert!(!parser.is_valid("1.2.3"));
        assert!(!parser.is_valid(""));
    }
}
