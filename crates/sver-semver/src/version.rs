//! The parsed version value type

use std::fmt;
use std::str::FromStr;

use crate::{SemverError, VersionParser};

/// A single prerelease identifier
///
/// Identifiers are classified once, at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// All digits, no leading zero unless exactly `0`
    Numeric(u64),
    /// Contains at least one letter or hyphen
    AlphaNumeric(String),
}

impl Identifier {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Which part of a version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Prerelease,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
            Field::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Field::Major),
            "minor" => Ok(Field::Minor),
            "patch" => Ok(Field::Patch),
            "prerelease" | "pre" => Ok(Field::Prerelease),
            _ => Err(SemverError::InvalidField(s.to_string())),
        }
    }
}

/// A validated Semantic Versioning 2.0.0 version
///
/// Equality is structural and includes build metadata. Use
/// [`Comparator`](crate::Comparator) or [`Version::cmp_precedence`] for
/// ordering, which ignores build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<Identifier>,
    build: Vec<String>,
}

impl Version {
    /// Create a release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Assemble a version from already validated parts
    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        pre: Vec<Identifier>,
        build: Vec<String>,
    ) -> Self {
        Version {
            major,
            minor,
            patch,
            pre,
            build,
        }
    }

    /// Parse a version string, see [`VersionParser::parse`]
    pub fn parse(version: &str) -> Result<Self, SemverError> {
        VersionParser::new().parse(version)
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre(&self) -> &[Identifier] {
        &self.pre
    }

    pub fn build(&self) -> &[String] {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Same major.minor.patch, prerelease and build ignored
    pub fn same_core(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Prerelease identifiers joined with `.`, empty for releases
    pub fn pre_string(&self) -> String {
        join(&self.pre)
    }

    /// Build identifiers joined with `.`, empty when absent
    pub fn build_string(&self) -> String {
        self.build.join(".")
    }

    /// Copy of this version with prerelease and build dropped
    pub fn to_release(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    pub(crate) fn with_pre(&self, pre: Vec<Identifier>) -> Version {
        Version::from_parts(self.major, self.minor, self.patch, pre, Vec::new())
    }
}

fn join(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", join(&self.pre))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        let v = Version::from_parts(
            1,
            0,
            0,
            vec![
                Identifier::AlphaNumeric("alpha".to_string()),
                Identifier::Numeric(1),
            ],
            vec!["build".to_string(), "007".to_string()],
        );
        assert_eq!(v.to_string(), "1.0.0-alpha.1+build.007");
        assert_eq!(v.pre_string(), "alpha.1");
        assert_eq!(v.build_string(), "build.007");
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "0.0.0",
            "1.2.3",
            "1.0.0-0",
            "1.0.0-alpha.1",
            "1.0.0-x-y-z.--",
            "1.0.0+20130313144700",
            "1.0.0-beta+exp.sha.5114f85",
            "18446744073709551615.0.0",
        ] {
            let v: Version = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
            assert_eq!(Version::parse(&v.to_string()).unwrap(), v);
        }
    }

    #[test]
    fn test_accessors() {
        let v = Version::parse("3.4.5-rc.1+linux").unwrap();
        assert_eq!(v.major(), 3);
        assert_eq!(v.minor(), 4);
        assert_eq!(v.patch(), 5);
        assert!(v.is_prerelease());
        assert_eq!(
            v.pre(),
            &[Identifier::AlphaNumeric("rc".to_string()), Identifier::Numeric(1)]
        );
        assert_eq!(v.build(), &["linux".to_string()]);
        assert_eq!(v.to_release(), Version::new(3, 4, 5));
        assert!(v.same_core(&Version::new(3, 4, 5)));
    }

    #[test]
    fn test_structural_equality_includes_build() {
        let a = Version::parse("1.0.0+build1").unwrap();
        let b = Version::parse("1.0.0+build2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("major".parse::<Field>().unwrap(), Field::Major);
        assert_eq!("Minor".parse::<Field>().unwrap(), Field::Minor);
        assert_eq!("patch".parse::<Field>().unwrap(), Field::Patch);
        assert_eq!("pre".parse::<Field>().unwrap(), Field::Prerelease);
        assert_eq!("prerelease".parse::<Field>().unwrap(), Field::Prerelease);
        assert!(matches!(
            "build".parse::<Field>(),
            Err(SemverError::InvalidField(f)) if f == "build"
        ));
    }
}
