//! A parsed version range

use std::fmt;
use std::str::FromStr;

use super::ConstraintInterface;
use crate::{SemverError, Version, VersionParser};

/// A parsed range expression, e.g. `^1.2.3 || >=2.0.0 <2.4.0`
///
/// Immutable once parsed and safe to share between threads. `Display` shows
/// the normalized comparator clauses, [`Range::as_str`] the text it was
/// parsed from.
#[derive(Debug, Clone)]
pub struct Range {
    pretty_string: String,
    constraint: Box<dyn ConstraintInterface>,
}

impl Range {
    pub(crate) fn new(pretty_string: String, constraint: Box<dyn ConstraintInterface>) -> Self {
        Range {
            pretty_string,
            constraint,
        }
    }

    /// Parse a range, see [`VersionParser::parse_range`]
    pub fn parse(range: &str) -> Result<Self, SemverError> {
        VersionParser::new().parse_range(range)
    }

    /// Check if the version is inside the range
    ///
    /// A prerelease is only accepted when a clause of the matching group
    /// itself names a prerelease of the same major.minor.patch.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.constraint.satisfies(version)
    }

    /// Check the version by precedence alone, prereleases included
    pub fn satisfies_including_prerelease(&self, version: &Version) -> bool {
        self.constraint.matches(version)
    }

    /// The range text as given to the parser
    pub fn as_str(&self) -> &str {
        &self.pretty_string
    }

    /// The root of the normalized clause tree
    pub fn constraint(&self) -> &dyn ConstraintInterface {
        self.constraint.as_ref()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constraint)
    }
}

impl FromStr for Range {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}
