//! Caller-owned parse cache

use std::collections::HashMap;

use crate::{SemverError, Version, VersionParser};

/// Memoizes parse results by the literal input string
///
/// The cache belongs to whoever creates it; the library keeps no global
/// state. Failed parses are cached as well so a bad input is only
/// diagnosed once.
#[derive(Debug, Default)]
pub struct VersionCache {
    parser: VersionParser,
    entries: HashMap<String, Result<Version, SemverError>>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `input`, or return the result of an earlier parse of the same text
    pub fn get_or_parse(&mut self, input: &str) -> Result<Version, SemverError> {
        if let Some(cached) = self.entries.get(input) {
            return cached.clone();
        }

        let parsed = self.parser.parse(input);
        self.entries.insert(input.to_string(), parsed.clone());
        parsed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_get_or_parse() {
        let mut cache = VersionCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_parse("1.2.3+build").unwrap();
        let second = cache.get_or_parse("1.2.3+build").unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        // Keyed by the literal text, not by the parsed value
        cache.get_or_parse("1.2.3").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_cached() {
        let mut cache = VersionCache::new();
        let err = cache.get_or_parse("1.02.0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCore);
        assert_eq!(cache.get_or_parse("1.02.0").unwrap_err(), err);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
