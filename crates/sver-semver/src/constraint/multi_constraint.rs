//! MultiConstraint - compound constraint combining multiple constraints

use std::fmt;
use thiserror::Error;

use super::{ConstraintInterface, MatchAllConstraint, MatchNoneConstraint};
use crate::Version;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultiConstraintError {
    #[error("Must provide at least two constraints for a MultiConstraint")]
    TooFewConstraints,
}

/// A constraint combining multiple constraints with AND (conjunctive) or OR (disjunctive) logic
///
/// A conjunctive node is one comparator set: every clause has to match, and a
/// prerelease is let through when any clause names a prerelease of the same
/// major.minor.patch. A disjunctive node holds whole comparator sets and asks
/// each of them in turn, so the prerelease rule stays local to a set.
#[derive(Debug, Clone)]
pub struct MultiConstraint {
    constraints: Vec<Box<dyn ConstraintInterface>>,
    conjunctive: bool,
}

impl MultiConstraint {
    /// Create a new MultiConstraint
    pub fn new(
        constraints: Vec<Box<dyn ConstraintInterface>>,
        conjunctive: bool,
    ) -> Result<Self, MultiConstraintError> {
        if constraints.len() < 2 {
            return Err(MultiConstraintError::TooFewConstraints);
        }

        Ok(MultiConstraint {
            constraints,
            conjunctive,
        })
    }

    /// Create the smallest constraint equivalent to the given list
    ///
    /// An empty list matches everything and a single entry is returned as is.
    /// Conjunctions drop `*` members and collapse to nothing when any member
    /// matches nothing.
    pub fn create(
        mut constraints: Vec<Box<dyn ConstraintInterface>>,
        conjunctive: bool,
    ) -> Box<dyn ConstraintInterface> {
        if conjunctive {
            if constraints.iter().any(|c| c.is_match_none()) {
                return Box::new(MatchNoneConstraint::new());
            }
            constraints.retain(|c| !c.is_match_all());
        }

        if constraints.is_empty() {
            return Box::new(MatchAllConstraint::new());
        }

        if constraints.len() == 1 {
            if let Some(only) = constraints.pop() {
                return only;
            }
        }

        Box::new(MultiConstraint {
            constraints,
            conjunctive,
        })
    }

    /// Get the constraints
    pub fn constraints(&self) -> &[Box<dyn ConstraintInterface>] {
        &self.constraints
    }

    /// Check if this is a conjunctive (AND) constraint
    pub fn is_conjunctive(&self) -> bool {
        self.conjunctive
    }

    /// Check if this is a disjunctive (OR) constraint
    pub fn is_disjunctive(&self) -> bool {
        !self.conjunctive
    }
}

impl ConstraintInterface for MultiConstraint {
    fn matches(&self, version: &Version) -> bool {
        if self.conjunctive {
            self.constraints.iter().all(|c| c.matches(version))
        } else {
            self.constraints.iter().any(|c| c.matches(version))
        }
    }

    fn allows_prerelease_of(&self, version: &Version) -> bool {
        self.constraints.iter().any(|c| c.allows_prerelease_of(version))
    }

    fn satisfies(&self, version: &Version) -> bool {
        if self.conjunctive {
            self.matches(version) && (!version.is_prerelease() || self.allows_prerelease_of(version))
        } else {
            self.constraints.iter().any(|c| c.satisfies(version))
        }
    }

    fn clone_box(&self) -> Box<dyn ConstraintInterface> {
        Box::new(self.clone())
    }

    fn as_multi_constraint(&self) -> Option<(&[Box<dyn ConstraintInterface>], bool)> {
        Some((&self.constraints, self.conjunctive))
    }
}

impl fmt::Display for MultiConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraints_str: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();

        let separator = if self.conjunctive { " " } else { " || " };
        write!(f, "{}", constraints_str.join(separator))
    }
}
