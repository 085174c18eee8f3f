//! Version bumping

use crate::{Field, Identifier, SemverError, Version, VersionParser};

impl Version {
    /// Produce the next version for `field`
    ///
    /// Build metadata is always dropped. Bumping `Patch` on a prerelease
    /// promotes it to its release instead of moving to the next patch, and
    /// bumping `Prerelease` on a release starts a counter at `0` without
    /// touching the patch number.
    pub fn increment(&self, field: Field) -> Result<Version, SemverError> {
        let overflow = || SemverError::IncrementOverflow {
            version: self.to_string(),
            field,
        };

        match field {
            Field::Major => {
                let major = self.major().checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(major, 0, 0))
            }
            Field::Minor => {
                let minor = self.minor().checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(self.major(), minor, 0))
            }
            Field::Patch => {
                if self.is_prerelease() {
                    return Ok(self.to_release());
                }
                let patch = self.patch().checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(self.major(), self.minor(), patch))
            }
            Field::Prerelease => {
                let mut pre = self.pre().to_vec();
                match pre.last_mut() {
                    Some(Identifier::Numeric(counter)) => {
                        *counter = counter.checked_add(1).ok_or_else(overflow)?;
                    }
                    _ => pre.push(Identifier::Numeric(0)),
                }
                Ok(self.with_pre(pre))
            }
        }
    }

    /// Bump the prerelease counter under a label such as `beta` or `rc`
    ///
    /// `1.2.3` becomes `1.2.3-beta.0`, `1.2.3-beta.4` becomes `1.2.3-beta.5`
    /// and `1.2.3-alpha.4` becomes `1.2.3-beta.0`.
    pub fn increment_prerelease_with(&self, label: &str) -> Result<Version, SemverError> {
        let label = VersionParser::new().parse_identifiers(label)?;

        let pre = self.pre();
        let stem = match pre.last() {
            Some(last) if last.is_numeric() => &pre[..pre.len() - 1],
            _ => pre,
        };

        if self.is_prerelease() && stem == label.as_slice() {
            return self.increment(Field::Prerelease);
        }

        let mut pre = label;
        pre.push(Identifier::Numeric(0));
        Ok(self.with_pre(pre))
    }
}
