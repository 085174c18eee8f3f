//! Version precedence

use std::cmp::Ordering;

use crate::{Identifier, Version};

/// Comparator implementing Semantic Versioning 2.0.0 precedence
///
/// Build metadata never takes part in any of these comparisons.
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) != Ordering::Greater
    }

    /// Check if version1 == version2 by precedence
    pub fn equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Equal
    }

    /// Check if version1 != version2 by precedence
    pub fn not_equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) != Ordering::Equal
    }

    /// Total order over versions
    pub fn compare(version1: &Version, version2: &Version) -> Ordering {
        version1
            .major()
            .cmp(&version2.major())
            .then_with(|| version1.minor().cmp(&version2.minor()))
            .then_with(|| version1.patch().cmp(&version2.patch()))
            .then_with(|| compare_pre(version1.pre(), version2.pre()))
    }
}

fn compare_pre(a: &[Identifier], b: &[Identifier]) -> Ordering {
    // A release outranks any prerelease of the same core
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (x, y) in a.iter().zip(b.iter()) {
        let ordering = compare_identifier(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.len().cmp(&b.len())
}

fn compare_identifier(a: &Identifier, b: &Identifier) -> Ordering {
    match (a, b) {
        (Identifier::Numeric(x), Identifier::Numeric(y)) => x.cmp(y),
        (Identifier::AlphaNumeric(x), Identifier::AlphaNumeric(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
        (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
    }
}

impl Version {
    /// Precedence ordering, see [`Comparator::compare`]
    pub fn cmp_precedence(&self, other: &Version) -> Ordering {
        Comparator::compare(self, other)
    }
}
