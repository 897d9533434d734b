//! Semantic version parsing and comparison.
//!
//! Only plain `major.minor.patch` versions are accepted; pre-release and
//! build-metadata suffixes (`2.0.0-rc.2`) are rejected. Components compare
//! numerically, so `9.0.0 < 10.0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static SEMVER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("valid semver regex"));

/// A parsed `major.minor.patch` version.
///
/// Ordering is derived field by field, which is numeric per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// The input is not a `major.minor.patch` version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid semantic version format: {0}")]
pub struct InvalidFormat(pub String);

impl Version {
    /// Create a version from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self, InvalidFormat> {
        let invalid = || InvalidFormat(input.to_string());
        let caps = SEMVER_PATTERN.captures(input).ok_or_else(invalid)?;
        // Components can still overflow u64 even though they are all digits.
        let component = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());
        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl FromStr for Version {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compare two version strings.
///
/// Fails when either side does not parse; callers skip the ordering check
/// in that case and report the format error separately.
pub fn compare(a: &str, b: &str) -> Result<Ordering, InvalidFormat> {
    Ok(Version::parse(a)?.cmp(&Version::parse(b)?))
}
