//! Single comparator constraint

use std::cmp::Ordering;
use std::fmt;

use super::{ConstraintInterface, Operator};
use crate::{Comparator, Version};

/// A single version constraint (e.g. ">=1.0.0")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    operator: Operator,
    version: Version,
}

impl Constraint {
    /// Create a new constraint
    pub fn new(operator: Operator, version: Version) -> Self {
        Constraint { operator, version }
    }

    /// Get the version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the operator
    pub fn operator(&self) -> Operator {
        self.operator
    }
}

impl ConstraintInterface for Constraint {
    fn matches(&self, version: &Version) -> bool {
        let ordering = Comparator::compare(version, &self.version);
        match self.operator {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    fn allows_prerelease_of(&self, version: &Version) -> bool {
        self.version.is_prerelease() && self.version.same_core(version)
    }

    fn clone_box(&self) -> Box<dyn ConstraintInterface> {
        Box::new(self.clone())
    }

    fn as_constraint(&self) -> Option<(&Operator, &Version)> {
        Some((&self.operator, &self.version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
