//! Constraint interface trait

use crate::Version;

/// Trait for all nodes of a parsed range
pub trait ConstraintInterface: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Check the version against this constraint by precedence alone
    fn matches(&self, version: &Version) -> bool;

    /// Check if this constraint explicitly names a prerelease of `version`'s
    /// major.minor.patch, which is what lets a prerelease through
    fn allows_prerelease_of(&self, _version: &Version) -> bool {
        false
    }

    /// Check the version, excluding prereleases unless explicitly allowed
    fn satisfies(&self, version: &Version) -> bool {
        self.matches(version) && (!version.is_prerelease() || self.allows_prerelease_of(version))
    }

    /// Clone this constraint into a boxed trait object
    fn clone_box(&self) -> Box<dyn ConstraintInterface>;

    /// Check if this is a single comparator constraint
    fn as_constraint(&self) -> Option<(&super::Operator, &Version)> {
        None
    }

    /// Check if this is a MatchAllConstraint
    fn is_match_all(&self) -> bool {
        false
    }

    /// Check if this is a MatchNoneConstraint
    fn is_match_none(&self) -> bool {
        false
    }

    /// Check if this is a MultiConstraint
    fn as_multi_constraint(&self) -> Option<(&[Box<dyn ConstraintInterface>], bool)> {
        None
    }
}

impl Clone for Box<dyn ConstraintInterface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
