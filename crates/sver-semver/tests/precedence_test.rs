//! End-to-end checks of the public API
//!
//! Everything here goes through the re-exports only, the way a downstream
//! crate would use the library.

use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;

use sver_semver::{Comparator, Component, Defect, ErrorKind, Field, Range, Semver, SemverError, Version};

fn v(version: &str) -> Version {
    Version::parse(version).unwrap()
}

fn satisfies(version: &str, range: &str) -> bool {
    Range::parse(range).unwrap().satisfies(&v(version))
}

#[test]
fn test_to_string_round_trips() {
    for input in [
        "0.0.0",
        "1.2.3",
        "1.0.0-0",
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-0.3.7",
        "1.0.0-x.7.z.92",
        "1.0.0-x-y-z.--",
        "1.0.0-alpha+001",
        "1.0.0+20130313144700",
        "1.0.0-beta+exp.sha.5114f85",
        "1.0.0+21AF26D3----117B344092BD",
    ] {
        let version = v(input);
        assert_eq!(version.to_string(), input);
        assert_eq!(v(&version.to_string()), version);
    }
}

#[test]
fn test_precedence_chain() {
    let chain = [
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-alpha.beta",
        "1.0.0-beta",
        "1.0.0-beta.2",
        "1.0.0-beta.11",
        "1.0.0-rc.1",
        "1.0.0",
        "1.0.1",
        "1.1.0",
        "2.0.0",
    ];
    for (i, a) in chain.iter().enumerate() {
        for (j, b) in chain.iter().enumerate() {
            assert_eq!(
                Comparator::compare(&v(a), &v(b)),
                i.cmp(&j),
                "compare({}, {})",
                a,
                b
            );
        }
    }
}

#[test]
fn test_strict_weak_ordering() {
    let sample: Vec<Version> = [
        "1.0.0",
        "1.0.0+a",
        "1.0.0+b",
        "1.0.0-rc.1",
        "1.0.0-rc.1+x",
        "0.9.9",
        "1.0.0-1",
        "1.0.0-a",
        "1.0.0-a.1",
        "10.0.0",
        "2.0.0",
    ]
    .iter()
    .map(|s| v(s))
    .collect();

    for a in &sample {
        assert_eq!(Comparator::compare(a, a), Ordering::Equal);
        for b in &sample {
            // Antisymmetry
            assert_eq!(Comparator::compare(a, b), Comparator::compare(b, a).reverse());
            for c in &sample {
                // Transitivity
                if Comparator::less_than_or_equal_to(a, b) && Comparator::less_than_or_equal_to(b, c) {
                    assert!(Comparator::less_than_or_equal_to(a, c), "{} <= {} <= {}", a, b, c);
                }
            }
        }
    }
}

#[test]
fn test_build_metadata_is_ignored_by_compare() {
    let a = v("1.0.0+build1");
    let b = v("1.0.0+build2");
    assert_eq!(Comparator::compare(&a, &b), Ordering::Equal);
    assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
    assert_ne!(a, b);
}

#[test]
fn test_leading_zeros_rejected() {
    let err = Version::parse("1.02.0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedCore);
    assert!(matches!(
        err,
        SemverError::MalformedCore {
            component: Component::Minor,
            defect: Defect::LeadingZero,
            ..
        }
    ));

    let err = Version::parse("1.0.0-01").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedIdentifier);

    assert!(Version::parse("1.0.0-0").is_ok());
    assert!(Version::parse("1.0.0-0a").is_ok());
    assert!(Version::parse("1.0.0+01").is_ok());
}

#[test]
fn test_error_kinds() {
    assert_eq!(Version::parse("").unwrap_err().kind(), ErrorKind::MalformedCore);
    assert_eq!(Version::parse("v1.2.3").unwrap_err().kind(), ErrorKind::MalformedCore);
    assert_eq!(Version::parse("1.2").unwrap_err().kind(), ErrorKind::MalformedCore);
    assert_eq!(Version::parse("1.2.3-").unwrap_err().kind(), ErrorKind::MalformedIdentifier);
    assert_eq!(Version::parse("1.2.3-a..b").unwrap_err().kind(), ErrorKind::MalformedIdentifier);
    assert_eq!(Version::parse("1.2.3+").unwrap_err().kind(), ErrorKind::MalformedIdentifier);
    assert_eq!(
        Version::parse("18446744073709551616.0.0").unwrap_err().kind(),
        ErrorKind::NumericOverflow
    );
    assert_eq!(Version::parse("1.2.3 ").unwrap_err().kind(), ErrorKind::TrailingInput);
    assert_eq!(Range::parse("").unwrap_err().kind(), ErrorKind::MalformedRangeClause);
    assert_eq!(Range::parse("1.x.2").unwrap_err().kind(), ErrorKind::MalformedRangeClause);
    assert_eq!(Range::parse("!=1.0.0").unwrap_err().kind(), ErrorKind::UnknownOperator);
    assert_eq!("build".parse::<Field>().unwrap_err().kind(), ErrorKind::InvalidField);
}

#[test]
fn test_increment() {
    assert_eq!(v("1.2.3").increment(Field::Major).unwrap(), v("2.0.0"));
    assert_eq!(v("1.2.3").increment(Field::Minor).unwrap(), v("1.3.0"));
    assert_eq!(v("1.2.3").increment(Field::Patch).unwrap(), v("1.2.4"));
    assert_eq!(v("1.2.3-beta").increment(Field::Patch).unwrap(), v("1.2.3"));
    assert_eq!(v("1.2.3").increment(Field::Prerelease).unwrap(), v("1.2.3-0"));
    assert_eq!(v("1.2.3-beta.1").increment(Field::Prerelease).unwrap(), v("1.2.3-beta.2"));
}

#[test]
fn test_caret() {
    assert!(satisfies("1.2.4", "^1.2.3"));
    assert!(satisfies("1.9.0", "^1.2.3"));
    assert!(!satisfies("2.0.0", "^1.2.3"));
    assert!(satisfies("0.2.9", "^0.2.3"));
    assert!(!satisfies("0.3.0", "^0.2.3"));
    assert!(satisfies("0.0.3", "^0.0.3"));
    assert!(!satisfies("0.0.4", "^0.0.3"));
}

#[test]
fn test_prerelease_exclusion() {
    assert!(!satisfies("1.2.3-alpha", ">=1.0.0"));
    assert!(satisfies("1.2.3-alpha", ">=1.2.3-alpha"));
    assert!(satisfies("1.2.3-alpha.7", ">1.2.3-alpha.3"));
    assert!(!satisfies("3.4.5-alpha.9", ">1.2.3-alpha.3"));
    assert!(satisfies("3.4.5", ">1.2.3-alpha.3"));
    assert!(!satisfies("1.2.4-alpha.1", "^1.2.3-alpha.1"));
    assert!(satisfies("1.2.4-alpha.1", "^1.2.3-alpha.1 || >=1.2.4-alpha.0 <1.3.0"));
}

#[test]
fn test_sort_is_stable() {
    let input: Vec<Version> = ["1.2.3", "1.2.3+b", "1.2.3+a", "1.0.0"]
        .iter()
        .map(|s| v(s))
        .collect();
    let sorted: Vec<String> = Semver::sort(&input).iter().map(|v| v.to_string()).collect();
    assert_eq!(sorted, vec!["1.0.0", "1.2.3", "1.2.3+b", "1.2.3+a"]);
}

#[test]
fn test_share_range_across_threads() {
    let range = Arc::new(Range::parse(">=1.0.0 <2.0.0 || ^3.1").unwrap());
    let handles: Vec<_> = ["1.5.0", "2.5.0", "3.4.0"]
        .into_iter()
        .map(|version| {
            let range = Arc::clone(&range);
            thread::spawn(move || range.satisfies(&v(version)))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true]);
}
