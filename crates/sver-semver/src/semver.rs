//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::constraint::Range;
use crate::{Comparator, Field, SemverError, Version, VersionParser};

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Parse a version string
    pub fn parse(version: &str) -> Result<Version, SemverError> {
        VersionParser::new().parse(version)
    }

    /// Compare two versions by precedence
    pub fn compare(version1: &Version, version2: &Version) -> Ordering {
        Comparator::compare(version1, version2)
    }

    /// Bump one field of a version
    pub fn increment(version: &Version, field: Field) -> Result<Version, SemverError> {
        version.increment(field)
    }

    /// Parse a range expression
    pub fn parse_range(range: &str) -> Result<Range, SemverError> {
        VersionParser::new().parse_range(range)
    }

    /// Check if a version satisfies a range
    pub fn satisfies(version: &Version, range: &Range) -> bool {
        range.satisfies(version)
    }

    /// Return all versions that satisfy the range, in their original order
    pub fn satisfied_by(versions: &[Version], range: &Range) -> Vec<Version> {
        versions
            .iter()
            .filter(|v| range.satisfies(v))
            .cloned()
            .collect()
    }

    /// Highest version inside the range
    pub fn max_satisfying<'a>(versions: &'a [Version], range: &Range) -> Option<&'a Version> {
        Self::max(versions.iter().filter(|v| range.satisfies(v)))
    }

    /// Lowest version inside the range
    pub fn min_satisfying<'a>(versions: &'a [Version], range: &Range) -> Option<&'a Version> {
        Self::min(versions.iter().filter(|v| range.satisfies(v)))
    }

    /// Highest version by precedence; the first one wins among equals
    pub fn max<'a, I>(versions: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().fold(None, |best, v| match best {
            Some(b) if Comparator::compare(v, b) != Ordering::Greater => Some(b),
            _ => Some(v),
        })
    }

    /// Lowest version by precedence; the first one wins among equals
    pub fn min<'a, I>(versions: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().fold(None, |best, v| match best {
            Some(b) if Comparator::compare(v, b) != Ordering::Less => Some(b),
            _ => Some(v),
        })
    }

    /// Sort versions in ascending order
    ///
    /// The sort is stable: versions differing only in build metadata keep
    /// their input order.
    pub fn sort(versions: &[Version]) -> Vec<Version> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[Version]) -> Vec<Version> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[Version], ascending: bool) -> Vec<Version> {
        let mut sorted = versions.to_vec();
        sorted.sort_by(|a, b| {
            if ascending {
                Comparator::compare(a, b)
            } else {
                Comparator::compare(b, a)
            }
        });
        sorted
    }
}
