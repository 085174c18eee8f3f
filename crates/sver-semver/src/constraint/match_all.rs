//! MatchAllConstraint - matches any version

use std::fmt;

use super::ConstraintInterface;
use crate::Version;

/// A constraint that matches any version (`*`)
///
/// Prereleases still only get through when something else in the same group
/// names them.
#[derive(Debug, Clone, Default)]
pub struct MatchAllConstraint;

impl MatchAllConstraint {
    /// Create a new MatchAllConstraint
    pub fn new() -> Self {
        MatchAllConstraint
    }
}

impl ConstraintInterface for MatchAllConstraint {
    fn matches(&self, _version: &Version) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn ConstraintInterface> {
        Box::new(self.clone())
    }

    fn is_match_all(&self) -> bool {
        true
    }
}

impl fmt::Display for MatchAllConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*")
    }
}
