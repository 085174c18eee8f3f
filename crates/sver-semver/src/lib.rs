//! Semantic Versioning 2.0.0 library
//!
//! This crate parses version strings, orders them by precedence, bumps them
//! and evaluates range expressions such as `^1.2.3 || >=2.0.0 <2.4.0`.
//! Every operation is a pure function over immutable values.

mod cache;
mod comparator;
pub mod constraint;
mod error;
mod increment;
mod semver;
mod version;
mod version_parser;

pub use cache::VersionCache;
pub use comparator::Comparator;
pub use constraint::{
    Constraint, ConstraintInterface, MatchAllConstraint, MatchNoneConstraint, MultiConstraint,
    MultiConstraintError, Operator, Range,
};
pub use error::{Component, Defect, ErrorKind, SemverError};
pub use semver::Semver;
pub use version::{Field, Identifier, Version};
pub use version_parser::VersionParser;
