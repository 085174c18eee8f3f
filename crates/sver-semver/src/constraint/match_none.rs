//! MatchNoneConstraint - matches no version

use std::fmt;

use super::ConstraintInterface;
use crate::Version;

/// A constraint that matches no version, e.g. `<*`
#[derive(Debug, Clone, Default)]
pub struct MatchNoneConstraint;

impl MatchNoneConstraint {
    /// Create a new MatchNoneConstraint
    pub fn new() -> Self {
        MatchNoneConstraint
    }
}

impl ConstraintInterface for MatchNoneConstraint {
    fn matches(&self, _version: &Version) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn ConstraintInterface> {
        Box::new(self.clone())
    }

    fn is_match_none(&self) -> bool {
        true
    }
}

impl fmt::Display for MatchNoneConstraint {
    // Nothing sorts below 0.0.0-0
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<0.0.0-0")
    }
}
