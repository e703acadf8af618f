//! Four-component versions and range expressions for release gating
//!
//! This crate parses version literals of the form
//! `major.minor.build.subBuild[-pre-release][+build]`, parses range
//! expressions such as `~1.2`, `^1.2.3` or `>=1.0.0.0 & <2.0.0.0`, and checks
//! whether a version satisfies a range.
//!
//! ```
//! use relver_semver::{ExpressionParser, Version};
//!
//! let range = ExpressionParser::new().parse("~1.2 | >=3").unwrap();
//! assert!(Version::parse("1.2.7.0").unwrap().satisfies(&range));
//! assert!(!Version::parse("2.0.0.0").unwrap().satisfies(&range));
//! ```

mod error;
pub mod expr;
mod metadata;
mod normal_version;
mod semver;
mod version;
mod version_parser;

pub use error::{Error, Result};
pub use expr::{CompositeExpression, Expression, ExpressionError, ExpressionParser, Lexer, Operator};
pub use metadata::MetadataVersion;
pub use normal_version::NormalVersion;
pub use semver::Semver;
pub use version::{Builder, Bump, Version, VersionError};
pub use version_parser::{CharType, UnexpectedCharacter, VersionParser, VersionParserError};
