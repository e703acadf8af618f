//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::error::Result;
use crate::expr::{CompositeExpression, ExpressionParser};
use crate::version::Version;
use crate::version_parser::VersionParser;

/// Main facade for version and range operations on text input
pub struct Semver;

impl Semver {
    /// Parse and validate a version literal
    pub fn parse_version(version: &str) -> Result<Version> {
        Ok(VersionParser::new().parse_valid(version)?)
    }

    /// Parse a range expression
    pub fn parse_range(range: &str) -> Result<CompositeExpression> {
        Ok(ExpressionParser::new().parse(range)?)
    }

    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str) -> Result<bool> {
        let version = Self::parse_version(version)?;
        let range = Self::parse_range(range)?;
        Ok(version.satisfies(&range))
    }

    /// Return all versions that satisfy the range. Invalid versions are skipped.
    pub fn satisfied_by(versions: &[&str], range: &str) -> Result<Vec<String>> {
        let range = Self::parse_range(range)?;
        let parser = VersionParser::new();

        Ok(versions
            .iter()
            .filter(|v| parser.parse_valid(v).is_ok_and(|version| version.satisfies(&range)))
            .map(|v| v.to_string())
            .collect())
    }

    /// Sort versions in ascending precedence order. Invalid versions are dropped.
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending precedence order
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let parser = VersionParser::new();

        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((parser.parse_valid(v).ok()?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp: Ordering = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed.into_iter().map(|(_, i)| versions[i].to_string()).collect()
    }

    /// The version to evaluate when none was discovered: `0.0.0.0`
    pub fn initial_version(discovered: Option<&str>) -> Result<Version> {
        match discovered {
            Some(version) => Self::parse_version(version),
            None => Ok(Version::default()),
        }
    }
}
