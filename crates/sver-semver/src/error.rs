//! Error types for version parsing, range parsing and bumping

use std::fmt;
use thiserror::Error;

use crate::version::Field;

/// The part of a version string an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
            Component::Prerelease => "prerelease",
            Component::Build => "build",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What is wrong with a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Defect {
    /// Required numeric component absent (also covers a stray `.`)
    Missing,
    /// Numeric component contains something other than digits
    NotNumeric,
    /// `01`, `007`, ...
    LeadingZero,
    /// Empty prerelease or build identifier, e.g. `1.0.0-a..b`
    Empty,
    /// Character outside `[0-9A-Za-z-]`
    DisallowedCharacter(char),
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::Missing => write!(f, "is missing"),
            Defect::NotNumeric => write!(f, "is not a number"),
            Defect::LeadingZero => write!(f, "has a leading zero"),
            Defect::Empty => write!(f, "identifier is empty"),
            Defect::DisallowedCharacter(c) => write!(f, "contains disallowed character {:?}", c),
        }
    }
}

/// Error type for everything that can go wrong in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    #[error("Invalid version string \"{input}\": {component} {defect} at position {position}")]
    MalformedCore {
        input: String,
        position: usize,
        component: Component,
        defect: Defect,
    },
    #[error("Invalid version string \"{input}\": {component} {defect} at position {position}")]
    MalformedIdentifier {
        input: String,
        position: usize,
        component: Component,
        defect: Defect,
    },
    #[error("Invalid version string \"{input}\": {component} at position {position} does not fit in 64 bits")]
    NumericOverflow {
        input: String,
        position: usize,
        component: Component,
    },
    #[error("Invalid version string \"{input}\": unexpected \"{rest}\" at position {position}")]
    TrailingInput {
        input: String,
        position: usize,
        rest: String,
    },
    #[error("Could not parse version range \"{range}\": {reason}")]
    MalformedRangeClause { range: String, reason: String },
    #[error("Invalid operator \"{operator}\" in version range \"{range}\"")]
    UnknownOperator { range: String, operator: String },
    #[error("Cannot bump {field} of \"{version}\": the result does not fit in 64 bits")]
    IncrementOverflow { version: String, field: Field },
    #[error("Invalid field \"{0}\", expected one of: major, minor, patch, prerelease")]
    InvalidField(String),
}

/// Coarse classification of [`SemverError`], stable enough to map onto exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedCore,
    MalformedIdentifier,
    NumericOverflow,
    TrailingInput,
    MalformedRangeClause,
    UnknownOperator,
    InvalidField,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedCore => "malformed-core",
            ErrorKind::MalformedIdentifier => "malformed-identifier",
            ErrorKind::NumericOverflow => "numeric-overflow",
            ErrorKind::TrailingInput => "trailing-input",
            ErrorKind::MalformedRangeClause => "malformed-range-clause",
            ErrorKind::UnknownOperator => "unknown-operator",
            ErrorKind::InvalidField => "invalid-field",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SemverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SemverError::MalformedCore { .. } => ErrorKind::MalformedCore,
            SemverError::MalformedIdentifier { .. } => ErrorKind::MalformedIdentifier,
            SemverError::NumericOverflow { .. } | SemverError::IncrementOverflow { .. } => {
                ErrorKind::NumericOverflow
            }
            SemverError::TrailingInput { .. } => ErrorKind::TrailingInput,
            SemverError::MalformedRangeClause { .. } => ErrorKind::MalformedRangeClause,
            SemverError::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            SemverError::InvalidField(_) => ErrorKind::InvalidField,
        }
    }

    /// Byte offset of the offending character in the parsed input, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            SemverError::MalformedCore { position, .. }
            | SemverError::MalformedIdentifier { position, .. }
            | SemverError::NumericOverflow { position, .. }
            | SemverError::TrailingInput { position, .. } => Some(*position),
            _ => None,
        }
    }
}
