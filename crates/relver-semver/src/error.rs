//! Crate-level error type

use thiserror::Error;

use crate::expr::ExpressionError;
use crate::version::VersionError;
use crate::version_parser::VersionParserError;

/// Any error raised while parsing versions or range expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error(transparent)]
    VersionParser(#[from] VersionParserError),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

pub type Result<T> = std::result::Result<T, Error>;
