//! The immutable version value and its two orderings

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::de::{self, Deserialize, Deserializer, Visitor};
#[cfg(feature = "serde")]
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

use crate::expr::{CompositeExpression, ExpressionError, ExpressionParser};
use crate::metadata::MetadataVersion;
use crate::normal_version::NormalVersion;
use crate::version_parser::{VersionParser, VersionParserError};

/// Error type for constructing and transforming versions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Cannot increment the {0}: it is not set")]
    AbsentField(&'static str),
    #[error("Cannot increment the {0}: it is already at its maximum")]
    Overflow(&'static str),
    #[error(transparent)]
    Parse(#[from] VersionParserError),
}

/// A version `major.minor.build.subBuild[-pre-release][+build]`.
///
/// `Eq`, `Ord` and `Hash` implement precedence order, which ignores build
/// metadata. Use [`Version::BUILD_AWARE_ORDER`] to tell builds apart.
#[derive(Debug, Clone, Default)]
pub struct Version {
    normal: NormalVersion,
    pre_release: Option<MetadataVersion>,
    build: Option<MetadataVersion>,
}

/// Which component of the normal version a release bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bump {
    Major,
    Minor,
    Build,
    SubBuild,
}

impl Bump {
    /// Classify the change from `from` to `to` by the most significant
    /// component that increased. `None` if `to` is not a newer normal version.
    pub fn between(from: &Version, to: &Version) -> Option<Bump> {
        if to.normal <= from.normal {
            return None;
        }
        let index = from
            .normal
            .components()
            .iter()
            .zip(to.normal.components())
            .position(|(a, b)| *a != b)?;
        Some(Bump::from_index(index))
    }

    fn from_index(index: usize) -> Bump {
        match index {
            0 => Bump::Major,
            1 => Bump::Minor,
            2 => Bump::Build,
            _ => Bump::SubBuild,
        }
    }
}

impl Version {
    /// Comparator for build-aware order, usable with `sort_by`
    pub const BUILD_AWARE_ORDER: fn(&Version, &Version) -> Ordering = Version::cmp_with_build;

    pub(crate) fn from_parts(
        normal: NormalVersion,
        pre_release: Option<MetadataVersion>,
        build: Option<MetadataVersion>,
    ) -> Self {
        Version {
            normal,
            pre_release,
            build,
        }
    }

    /// Create a version without pre-release or build metadata
    pub fn for_integers(major: u64, minor: u64, build: u64, sub_build: u64) -> Self {
        Version::from(NormalVersion::new(major, minor, build, sub_build))
    }

    /// Parse and validate a version literal
    pub fn parse(input: &str) -> Result<Self, VersionParserError> {
        VersionParser::new().parse_valid(input)
    }

    pub fn major(&self) -> u64 {
        self.normal.major()
    }

    pub fn minor(&self) -> u64 {
        self.normal.minor()
    }

    pub fn build(&self) -> u64 {
        self.normal.build()
    }

    pub fn sub_build(&self) -> u64 {
        self.normal.sub_build()
    }

    pub fn normal_version(&self) -> &NormalVersion {
        &self.normal
    }

    pub fn pre_release(&self) -> Option<&MetadataVersion> {
        self.pre_release.as_ref()
    }

    pub fn build_metadata_identifiers(&self) -> Option<&MetadataVersion> {
        self.build.as_ref()
    }

    /// Pre-release text, e.g. `rc.1`
    pub fn pre_release_version(&self) -> Option<String> {
        self.pre_release.as_ref().map(ToString::to_string)
    }

    /// Build metadata text, e.g. `build.5`
    pub fn build_metadata(&self) -> Option<String> {
        self.build.as_ref().map(ToString::to_string)
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    pub fn increment_major(&self) -> Result<Self, VersionError> {
        Ok(Version::from(self.normal.increment_major()?))
    }

    pub fn increment_major_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        Self::with_pre_release(self.normal.increment_major()?, pre_release)
    }

    pub fn increment_minor(&self) -> Result<Self, VersionError> {
        Ok(Version::from(self.normal.increment_minor()?))
    }

    pub fn increment_minor_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        Self::with_pre_release(self.normal.increment_minor()?, pre_release)
    }

    pub fn increment_build(&self) -> Result<Self, VersionError> {
        Ok(Version::from(self.normal.increment_build()?))
    }

    pub fn increment_build_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        Self::with_pre_release(self.normal.increment_build()?, pre_release)
    }

    pub fn increment_sub_build(&self) -> Result<Self, VersionError> {
        Ok(Version::from(self.normal.increment_sub_build()?))
    }

    pub fn increment_sub_build_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        Self::with_pre_release(self.normal.increment_sub_build()?, pre_release)
    }

    /// Apply a [`Bump`], dropping pre-release and build metadata
    pub fn increment(&self, bump: Bump) -> Result<Self, VersionError> {
        match bump {
            Bump::Major => self.increment_major(),
            Bump::Minor => self.increment_minor(),
            Bump::Build => self.increment_build(),
            Bump::SubBuild => self.increment_sub_build(),
        }
    }

    fn with_pre_release(normal: NormalVersion, pre_release: &str) -> Result<Self, VersionError> {
        let pre_release = VersionParser::new().parse_pre_release(pre_release)?;
        Ok(Version::from_parts(normal, Some(pre_release), None))
    }

    /// Bump the last numeric pre-release identifier. Build metadata is dropped.
    pub fn increment_pre_release_version(&self) -> Result<Self, VersionError> {
        let pre_release = self
            .pre_release
            .as_ref()
            .ok_or(VersionError::AbsentField("pre-release version"))?;
        Ok(Version::from_parts(self.normal, Some(pre_release.increment()), None))
    }

    /// Bump the last numeric build metadata identifier
    pub fn increment_build_metadata(&self) -> Result<Self, VersionError> {
        let build = self
            .build
            .as_ref()
            .ok_or(VersionError::AbsentField("build metadata"))?;
        Ok(Version::from_parts(
            self.normal,
            self.pre_release.clone(),
            Some(build.increment()),
        ))
    }

    /// Replace the pre-release. Build metadata is dropped.
    pub fn set_pre_release_version(&self, pre_release: &str) -> Result<Self, VersionError> {
        Self::with_pre_release(self.normal, pre_release)
    }

    pub fn set_build_metadata(&self, build: &str) -> Result<Self, VersionError> {
        let build = VersionParser::new().parse_build(build)?;
        Ok(Version::from_parts(self.normal, self.pre_release.clone(), Some(build)))
    }

    /// Check this version against a parsed range expression
    pub fn satisfies(&self, expression: &CompositeExpression) -> bool {
        expression.interpret(self)
    }

    /// Parse `expression` and check this version against it
    pub fn satisfies_str(&self, expression: &str) -> Result<bool, ExpressionError> {
        let expression = ExpressionParser::new().parse(expression)?;
        Ok(self.satisfies(&expression))
    }

    /// Precedence order, with build metadata breaking ties.
    ///
    /// A version without build metadata sorts before the same version with it.
    pub fn cmp_with_build(&self, other: &Version) -> Ordering {
        self.cmp(other).then_with(|| self.build.cmp(&other.build))
    }
}

impl From<NormalVersion> for Version {
    fn from(normal: NormalVersion) -> Self {
        Version::from_parts(normal, None, None)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normal.cmp(&other.normal).then_with(|| {
            match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            }
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normal.hash(state);
        self.pre_release.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normal)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{}", pre_release)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a major.minor.build.subBuild version string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Version::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

/// Accumulates the parts of a version literal and parses them once
#[derive(Debug, Clone, Default)]
pub struct Builder {
    normal_version: String,
    pre_release_version: Option<String>,
    build_metadata: Option<String>,
}

impl Builder {
    pub fn new(normal_version: impl Into<String>) -> Self {
        Builder {
            normal_version: normal_version.into(),
            ..Builder::default()
        }
    }

    pub fn normal_version(mut self, normal_version: impl Into<String>) -> Self {
        self.normal_version = normal_version.into();
        self
    }

    pub fn pre_release_version(mut self, pre_release: impl Into<String>) -> Self {
        self.pre_release_version = Some(pre_release.into());
        self
    }

    pub fn build_metadata(mut self, build: impl Into<String>) -> Self {
        self.build_metadata = Some(build.into());
        self
    }

    pub fn build(self) -> Result<Version, VersionParserError> {
        let mut literal = self.normal_version;
        if let Some(pre_release) = self.pre_release_version.filter(|s| !s.is_empty()) {
            literal.push('-');
            literal.push_str(&pre_release);
        }
        if let Some(build) = self.build_metadata.filter(|s| !s.is_empty()) {
            literal.push('+');
            literal.push_str(&build);
        }
        VersionParser::new().parse_valid(&literal)
    }
}
