//! The numeric core of a version: `major.minor.build.subBuild`

use std::fmt;

use crate::version::VersionError;

/// Four non-negative integers ordered component by component.
///
/// The derived ordering compares `major`, then `minor`, then `build`, then
/// `sub_build`, which is exactly the numeric precedence of the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalVersion {
    major: u64,
    minor: u64,
    build: u64,
    sub_build: u64,
}

impl NormalVersion {
    /// Create a normal version from its four components
    pub fn new(major: u64, minor: u64, build: u64, sub_build: u64) -> Self {
        NormalVersion {
            major,
            minor,
            build,
            sub_build,
        }
    }

    /// Create a normal version from signed components, rejecting negatives
    pub fn try_new(major: i64, minor: i64, build: i64, sub_build: i64) -> Result<Self, VersionError> {
        let component = |value: i64| {
            u64::try_from(value).map_err(|_| {
                VersionError::InvalidArgument(
                    "Major, minor, build and subBuild versions MUST be non-negative integers".to_string(),
                )
            })
        };

        Ok(NormalVersion::new(
            component(major)?,
            component(minor)?,
            component(build)?,
            component(sub_build)?,
        ))
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn build(&self) -> u64 {
        self.build
    }

    pub fn sub_build(&self) -> u64 {
        self.sub_build
    }

    /// Components in significance order
    pub fn components(&self) -> [u64; 4] {
        [self.major, self.minor, self.build, self.sub_build]
    }

    pub fn increment_major(&self) -> Result<Self, VersionError> {
        self.increment_component(0, "major version")
    }

    pub fn increment_minor(&self) -> Result<Self, VersionError> {
        self.increment_component(1, "minor version")
    }

    pub fn increment_build(&self) -> Result<Self, VersionError> {
        self.increment_component(2, "build version")
    }

    pub fn increment_sub_build(&self) -> Result<Self, VersionError> {
        self.increment_component(3, "subBuild version")
    }

    fn increment_component(&self, index: usize, name: &'static str) -> Result<Self, VersionError> {
        self.checked_increment(index).ok_or(VersionError::Overflow(name))
    }

    /// Increment the component at `index` (0 = major) and zero everything after it.
    ///
    /// Returns `None` when the index is out of range or the component is
    /// already at its maximum.
    pub fn checked_increment(&self, index: usize) -> Option<Self> {
        let mut parts = self.components();
        let bumped = parts.get(index)?.checked_add(1)?;
        parts[index] = bumped;
        for part in parts.iter_mut().skip(index + 1) {
            *part = 0;
        }
        Some(NormalVersion::from(parts))
    }
}

impl From<[u64; 4]> for NormalVersion {
    fn from(parts: [u64; 4]) -> Self {
        NormalVersion::new(parts[0], parts[1], parts[2], parts[3])
    }
}

impl TryFrom<[i64; 4]> for NormalVersion {
    type Error = VersionError;

    fn try_from(parts: [i64; 4]) -> Result<Self, Self::Error> {
        NormalVersion::try_new(parts[0], parts[1], parts[2], parts[3])
    }
}

impl fmt::Display for NormalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.sub_build)
    }
}
