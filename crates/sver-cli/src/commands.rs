//! Subcommand implementations
//!
//! Each command returns an [`Outcome`] instead of printing, so `main` owns
//! all terminal I/O.

use anyhow::{Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::io::BufRead;

use sver_semver::{Field, Identifier, Range, Semver, SemverError, Version, VersionCache};

/// Lines to print and the exit code to finish with
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub code: i32,
}

impl Outcome {
    pub fn print(line: impl Into<String>) -> Self {
        Outcome {
            lines: vec![line.into()],
            code: 0,
        }
    }

    pub fn print_all(lines: Vec<String>) -> Self {
        Outcome { lines, code: 0 }
    }

    /// Silent outcome, exit 0 when `value` holds and 1 otherwise
    pub fn truth(value: bool) -> Self {
        Outcome {
            lines: Vec::new(),
            code: if value { 0 } else { 1 },
        }
    }

    /// Print the lines, exit 1 when there are none
    fn non_empty(lines: Vec<String>) -> Self {
        let code = if lines.is_empty() { 1 } else { 0 };
        Outcome { lines, code }
    }
}

/// Parses version arguments through a shared cache
pub struct VersionReader {
    cache: VersionCache,
    strip_v_prefix: bool,
}

impl VersionReader {
    pub fn new(strip_v_prefix: bool) -> Self {
        VersionReader {
            cache: VersionCache::new(),
            strip_v_prefix,
        }
    }

    pub fn read(&mut self, input: &str) -> Result<Version, SemverError> {
        let input = if self.strip_v_prefix {
            input.strip_prefix(['v', 'V']).unwrap_or(input)
        } else {
            input
        };
        self.cache.get_or_parse(input)
    }

    /// Parse every input, skipping invalid ones with a warning
    fn read_all(&mut self, inputs: &[String]) -> Vec<Version> {
        inputs
            .iter()
            .filter_map(|input| match self.read(input) {
                Ok(version) => Some(version),
                Err(e) => {
                    log::warn!("Skipping \"{}\": {}", input, e);
                    None
                }
            })
            .collect()
    }
}

/// Version arguments, or whitespace separated versions from `stdin` when none were given
pub fn collect_inputs(args: Vec<String>, stdin: impl BufRead) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let mut inputs = Vec::new();
    for line in stdin.lines() {
        let line = line.context("Failed to read versions from stdin")?;
        inputs.extend(line.split_whitespace().map(str::to_string));
    }
    log::debug!("Read {} versions from stdin", inputs.len());
    Ok(inputs)
}

pub fn version() -> Outcome {
    Outcome::print(format!("sver {}", env!("CARGO_PKG_VERSION")))
}

pub fn validate(reader: &mut VersionReader, version: &str) -> Result<Outcome> {
    reader.read(version)?;
    Ok(Outcome::truth(true))
}

pub fn compare(reader: &mut VersionReader, a: &str, b: &str) -> Result<Outcome> {
    let ordering = Semver::compare(&reader.read(a)?, &reader.read(b)?);
    let result = match ordering {
        Ordering::Less => "-1",
        Ordering::Equal => "0",
        Ordering::Greater => "1",
    };
    Ok(Outcome::print(result))
}

/// Exit 0 when `a` compares to `b` as `expected`
pub fn check_order(reader: &mut VersionReader, a: &str, b: &str, expected: Ordering) -> Result<Outcome> {
    let ordering = Semver::compare(&reader.read(a)?, &reader.read(b)?);
    Ok(Outcome::truth(ordering == expected))
}

pub fn get(reader: &mut VersionReader, field: &str, version: &str) -> Result<Outcome> {
    let version = reader.read(version)?;
    if field.eq_ignore_ascii_case("build") {
        return Ok(Outcome::print(version.build_string()));
    }

    let value = match field.parse::<Field>()? {
        Field::Major => version.major().to_string(),
        Field::Minor => version.minor().to_string(),
        Field::Patch => version.patch().to_string(),
        Field::Prerelease => version.pre_string(),
    };
    Ok(Outcome::print(value))
}

/// Bump `field`; with a label, the result becomes a prerelease under that label
pub fn bump(reader: &mut VersionReader, field: &str, version: &str, pre_id: Option<&str>) -> Result<Outcome> {
    let field: Field = field.parse()?;
    let version = reader.read(version)?;

    let bumped = match (field, pre_id) {
        (Field::Prerelease, Some(label)) => version.increment_prerelease_with(label)?,
        // Promotion alone would land below the input once the label is applied
        (Field::Patch, Some(label)) if version.is_prerelease() => version
            .to_release()
            .increment(Field::Patch)?
            .increment_prerelease_with(label)?,
        (_, Some(label)) => version.increment(field)?.increment_prerelease_with(label)?,
        (_, None) => version.increment(field)?,
    };
    log::debug!("Bumped {} of {} to {}", field, version, bumped);
    Ok(Outcome::print(bumped.to_string()))
}

#[derive(Serialize)]
struct VersionJson<'a> {
    version: String,
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<serde_json::Value>,
    build: &'a [String],
}

pub fn json(reader: &mut VersionReader, version: &str) -> Result<Outcome> {
    let version = reader.read(version)?;
    let prerelease = version
        .pre()
        .iter()
        .map(|identifier| match identifier {
            Identifier::Numeric(n) => serde_json::Value::from(*n),
            Identifier::AlphaNumeric(s) => serde_json::Value::from(s.as_str()),
        })
        .collect();

    let document = VersionJson {
        version: version.to_string(),
        major: version.major(),
        minor: version.minor(),
        patch: version.patch(),
        prerelease,
        build: version.build(),
    };
    Ok(Outcome::print(serde_json::to_string_pretty(&document)?))
}

pub fn satisfies(reader: &mut VersionReader, version: &str, range: &str) -> Result<Outcome> {
    let version = reader.read(version)?;
    let range = Range::parse(range)?;
    log::debug!("Range \"{}\" normalized to \"{}\"", range.as_str(), range);
    Ok(Outcome::truth(range.satisfies(&version)))
}

pub fn filter(reader: &mut VersionReader, range: &str, inputs: &[String]) -> Result<Outcome> {
    let range = Range::parse(range)?;
    let versions = reader.read_all(inputs);
    let lines = Semver::satisfied_by(&versions, &range)
        .iter()
        .map(|v| v.to_string())
        .collect();
    Ok(Outcome::non_empty(lines))
}

pub fn sort(reader: &mut VersionReader, inputs: &[String], reverse: bool) -> Result<Outcome> {
    let versions = reader.read_all(inputs);
    let sorted = if reverse {
        Semver::rsort(&versions)
    } else {
        Semver::sort(&versions)
    };
    Ok(Outcome::print_all(sorted.iter().map(|v| v.to_string()).collect()))
}

/// Highest (or lowest) version, optionally restricted to a range
pub fn extreme(reader: &mut VersionReader, inputs: &[String], range: Option<&str>, highest: bool) -> Result<Outcome> {
    let versions = reader.read_all(inputs);
    let found = match range {
        Some(range) => {
            let range = Range::parse(range)?;
            if highest {
                Semver::max_satisfying(&versions, &range)
            } else {
                Semver::min_satisfying(&versions, &range)
            }
        }
        None if highest => Semver::max(&versions),
        None => Semver::min(&versions),
    };
    Ok(Outcome::non_empty(found.map(|v| v.to_string()).into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sver_semver::ErrorKind;

    fn reader() -> VersionReader {
        VersionReader::new(false)
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn kind(err: anyhow::Error) -> ErrorKind {
        err.downcast_ref::<SemverError>().unwrap().kind()
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(&mut reader(), "1.2.3-rc.1").unwrap(), Outcome::truth(true));
        assert_eq!(
            kind(validate(&mut reader(), "1.2").unwrap_err()),
            ErrorKind::MalformedCore
        );
    }

    #[test]
    fn test_strip_v_prefix() {
        assert!(validate(&mut reader(), "v1.2.3").is_err());
        let mut reader = VersionReader::new(true);
        assert_eq!(validate(&mut reader, "v1.2.3").unwrap().code, 0);
        assert_eq!(validate(&mut reader, "V1.2.3").unwrap().code, 0);
        assert!(validate(&mut reader, "vv1.2.3").is_err());
    }

    #[test]
    fn test_compare() {
        let mut r = reader();
        assert_eq!(compare(&mut r, "1.0.0", "2.0.0").unwrap(), Outcome::print("-1"));
        assert_eq!(compare(&mut r, "1.0.0+a", "1.0.0+b").unwrap(), Outcome::print("0"));
        assert_eq!(compare(&mut r, "1.0.0", "1.0.0-rc.1").unwrap(), Outcome::print("1"));
    }

    #[test]
    fn test_check_order() {
        let mut r = reader();
        assert_eq!(check_order(&mut r, "1.0.0", "2.0.0", Ordering::Less).unwrap().code, 0);
        assert_eq!(check_order(&mut r, "1.0.0", "2.0.0", Ordering::Greater).unwrap().code, 1);
        assert_eq!(check_order(&mut r, "1.0.0+x", "1.0.0", Ordering::Equal).unwrap().code, 0);
    }

    #[test]
    fn test_get() {
        let mut r = reader();
        let v = "3.4.5-rc.1+linux.x64";
        assert_eq!(get(&mut r, "major", v).unwrap(), Outcome::print("3"));
        assert_eq!(get(&mut r, "minor", v).unwrap(), Outcome::print("4"));
        assert_eq!(get(&mut r, "patch", v).unwrap(), Outcome::print("5"));
        assert_eq!(get(&mut r, "prerelease", v).unwrap(), Outcome::print("rc.1"));
        assert_eq!(get(&mut r, "build", v).unwrap(), Outcome::print("linux.x64"));
        assert_eq!(kind(get(&mut r, "micro", v).unwrap_err()), ErrorKind::InvalidField);
    }

    #[test]
    fn test_bump() {
        let mut r = reader();
        assert_eq!(bump(&mut r, "major", "1.2.3", None).unwrap(), Outcome::print("2.0.0"));
        assert_eq!(bump(&mut r, "patch", "1.2.3-beta", None).unwrap(), Outcome::print("1.2.3"));
        assert_eq!(bump(&mut r, "pre", "1.2.3-beta.1", None).unwrap(), Outcome::print("1.2.3-beta.2"));
        assert_eq!(
            bump(&mut r, "prerelease", "1.2.3-alpha.4", Some("beta")).unwrap(),
            Outcome::print("1.2.3-beta.0")
        );
        assert_eq!(
            bump(&mut r, "minor", "1.2.3", Some("rc")).unwrap(),
            Outcome::print("1.3.0-rc.0")
        );
        assert_eq!(
            bump(&mut r, "patch", "1.2.3", Some("rc")).unwrap(),
            Outcome::print("1.2.4-rc.0")
        );
        assert_eq!(
            kind(bump(&mut r, "build", "1.2.3", None).unwrap_err()),
            ErrorKind::InvalidField
        );
        assert_eq!(
            kind(bump(&mut r, "major", &format!("{}.0.0", u64::MAX), None).unwrap_err()),
            ErrorKind::NumericOverflow
        );
    }

    #[test]
    fn test_bump_patch_with_label_moves_forward() {
        let mut r = reader();
        for (input, expected) in [("1.2.3-rc.1", "1.2.4-rc.0"), ("1.2.3-beta", "1.2.4-rc.0")] {
            let outcome = bump(&mut r, "patch", input, Some("rc")).unwrap();
            assert_eq!(outcome, Outcome::print(expected));
            let before = r.read(input).unwrap();
            let after = r.read(&outcome.lines[0]).unwrap();
            assert_eq!(Semver::compare(&after, &before), Ordering::Greater);
        }
    }

    #[test]
    fn test_json() {
        let outcome = json(&mut reader(), "1.2.3-rc.1+build.5").unwrap();
        let value: serde_json::Value = serde_json::from_str(&outcome.lines[0]).unwrap();
        assert_eq!(value["version"], "1.2.3-rc.1+build.5");
        assert_eq!(value["major"], 1);
        assert_eq!(value["minor"], 2);
        assert_eq!(value["patch"], 3);
        assert_eq!(value["prerelease"], serde_json::json!(["rc", 1]));
        assert_eq!(value["build"], serde_json::json!(["build", "5"]));
    }

    #[test]
    fn test_satisfies() {
        let mut r = reader();
        assert_eq!(satisfies(&mut r, "1.5.0", "^1.2").unwrap().code, 0);
        assert_eq!(satisfies(&mut r, "1.5.0-beta", "^1.2").unwrap().code, 1);
        assert_eq!(
            kind(satisfies(&mut r, "1.5.0", "=>1.2").unwrap_err()),
            ErrorKind::UnknownOperator
        );
    }

    #[test]
    fn test_filter_skips_invalid() {
        let inputs = strings(&["1.0.0", "bogus", "1.4.0", "2.0.0", "1.5.0-rc.1"]);
        let outcome = filter(&mut reader(), "~1", &inputs).unwrap();
        assert_eq!(outcome, Outcome::print_all(strings(&["1.0.0", "1.4.0"])));

        let outcome = filter(&mut reader(), ">=3", &inputs).unwrap();
        assert_eq!(outcome.code, 1);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_sort() {
        let inputs = strings(&["1.2.3", "1.2.3+b", "1.2.3+a", "1.0.0", "nope"]);
        assert_eq!(
            sort(&mut reader(), &inputs, false).unwrap().lines,
            strings(&["1.0.0", "1.2.3", "1.2.3+b", "1.2.3+a"])
        );
        assert_eq!(
            sort(&mut reader(), &inputs, true).unwrap().lines,
            strings(&["1.2.3", "1.2.3+b", "1.2.3+a", "1.0.0"])
        );
    }

    #[test]
    fn test_extreme() {
        let inputs = strings(&["1.0.0", "2.1.0", "1.9.0", "3.0.0-beta"]);
        let mut r = reader();
        assert_eq!(extreme(&mut r, &inputs, None, true).unwrap(), Outcome::print("3.0.0-beta"));
        assert_eq!(extreme(&mut r, &inputs, None, false).unwrap(), Outcome::print("1.0.0"));
        assert_eq!(extreme(&mut r, &inputs, Some("<2"), true).unwrap(), Outcome::print("1.9.0"));
        assert_eq!(extreme(&mut r, &inputs, Some("^2"), false).unwrap(), Outcome::print("2.1.0"));
        assert_eq!(extreme(&mut r, &inputs, Some(">=4"), true).unwrap().code, 1);
        assert_eq!(extreme(&mut r, &[], None, true).unwrap().code, 1);
    }

    #[test]
    fn test_collect_inputs() {
        let args = strings(&["1.0.0"]);
        assert_eq!(collect_inputs(args.clone(), Cursor::new("2.0.0")).unwrap(), args);

        let stdin = Cursor::new("1.0.0 1.1.0\n\n  2.0.0\n");
        assert_eq!(
            collect_inputs(Vec::new(), stdin).unwrap(),
            strings(&["1.0.0", "1.1.0", "2.0.0"])
        );
    }
}
