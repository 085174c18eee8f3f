//! Version and range parsing

use lazy_static::lazy_static;
use regex::Regex;

use crate::constraint::{
    Constraint, ConstraintInterface, MatchAllConstraint, MatchNoneConstraint, MultiConstraint,
    Operator, Range,
};
use crate::error::{Component, Defect};
use crate::{Identifier, SemverError, Version};

lazy_static! {
    // OR constraint splitter
    static ref OR_CONSTRAINT_RE: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    // AND constraint splitter for the comma form; whitespace separates the rest
    static ref AND_CONSTRAINT_RE: Regex = Regex::new(r"\s*,\s*").unwrap();

    // Operator prefix of a single clause, e.g. ">=" in ">=1.2.3"
    static ref CLAUSE_OPERATOR_RE: Regex = Regex::new(r"(?s)^([<>=!~^|]*)(.*)$").unwrap();
}

const CORE_COMPONENTS: [Component; 3] = [Component::Major, Component::Minor, Component::Patch];

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Byte cursor over a version string
///
/// Only ASCII is ever consumed, so `pos` always sits on a char boundary.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    fn at(input: &'a str, pos: usize) -> Self {
        Scanner { input, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn core_error(&self, position: usize, component: Component, defect: Defect) -> SemverError {
        SemverError::MalformedCore {
            input: self.input.to_string(),
            position,
            component,
            defect,
        }
    }

    fn identifier_error(&self, position: usize, component: Component, defect: Defect) -> SemverError {
        SemverError::MalformedIdentifier {
            input: self.input.to_string(),
            position,
            component,
            defect,
        }
    }

    /// Read a major/minor/patch number
    fn numeric(&mut self, component: Component) -> Result<u64, SemverError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }

        if start == self.pos {
            let defect = match self.peek() {
                None | Some(b'.') | Some(b'-') | Some(b'+') => Defect::Missing,
                _ => Defect::NotNumeric,
            };
            return Err(self.core_error(start, component, defect));
        }

        let digits = &self.input[start..self.pos];
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(self.core_error(start, component, Defect::LeadingZero));
        }
        if matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            return Err(self.core_error(self.pos, component, Defect::NotNumeric));
        }

        digits.parse::<u64>().map_err(|_| SemverError::NumericOverflow {
            input: self.input.to_string(),
            position: start,
            component,
        })
    }

    /// Consume the `.` between two core components
    fn separator(&mut self, current: Component, next: Component) -> Result<(), SemverError> {
        match self.peek() {
            Some(b'.') => {
                self.pos += 1;
                Ok(())
            }
            None | Some(b'-') | Some(b'+') => Err(self.core_error(self.pos, next, Defect::Missing)),
            Some(_) => Err(self.core_error(self.pos, current, Defect::NotNumeric)),
        }
    }

    /// Read a dot separated identifier list, returning each identifier with its offset
    ///
    /// A `+` terminates the list only when `stop_at_plus` is set (prerelease
    /// followed by build metadata); anywhere else it is a disallowed character.
    fn identifiers(
        &mut self,
        component: Component,
        stop_at_plus: bool,
    ) -> Result<Vec<(usize, &'a str)>, SemverError> {
        let mut identifiers = Vec::new();

        loop {
            let start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'-') {
                self.pos += 1;
            }

            match self.peek() {
                None | Some(b'.') => {}
                Some(b'+') if stop_at_plus => {}
                Some(_) => {
                    let c = self.current_char();
                    return Err(self.identifier_error(self.pos, component, Defect::DisallowedCharacter(c)));
                }
            }

            if start == self.pos {
                return Err(self.identifier_error(start, component, Defect::Empty));
            }
            let input = self.input;
            identifiers.push((start, &input[start..self.pos]));

            if !self.eat(b'.') {
                break;
            }
        }

        Ok(identifiers)
    }

    fn prerelease_identifier(&self, position: usize, text: &str) -> Result<Identifier, SemverError> {
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Identifier::AlphaNumeric(text.to_string()));
        }
        if text.len() > 1 && text.starts_with('0') {
            return Err(self.identifier_error(position, Component::Prerelease, Defect::LeadingZero));
        }
        text.parse::<u64>()
            .map(Identifier::Numeric)
            .map_err(|_| SemverError::NumericOverflow {
                input: self.input.to_string(),
                position,
                component: Component::Prerelease,
            })
    }

    fn prerelease(&mut self, stop_at_plus: bool) -> Result<Vec<Identifier>, SemverError> {
        self.identifiers(Component::Prerelease, stop_at_plus)?
            .into_iter()
            .map(|(position, text)| self.prerelease_identifier(position, text))
            .collect()
    }
}

/// A range operand with possibly omitted or wildcard trailing components
#[derive(Debug)]
struct Partial<'a> {
    text: &'a str,
    parts: [Option<u64>; 3],
    pre: Vec<Identifier>,
}

impl<'a> Partial<'a> {
    /// Number of leading components actually given
    fn given(&self) -> usize {
        self.parts.iter().take_while(|p| p.is_some()).count()
    }

    fn is_any(&self) -> bool {
        self.given() == 0
    }

    fn is_full(&self) -> bool {
        self.given() == 3
    }

    /// Smallest version the operand stands for: omitted parts become zero
    fn floor(&self) -> Version {
        Version::from_parts(
            self.parts[0].unwrap_or(0),
            self.parts[1].unwrap_or(0),
            self.parts[2].unwrap_or(0),
            self.pre.clone(),
            Vec::new(),
        )
    }

    /// Bump the component at `index`, zeroing everything to its right
    fn bump(&self, index: usize) -> Result<Version, SemverError> {
        let mut parts = self.parts.map(|p| p.unwrap_or(0));
        parts[index] = parts[index]
            .checked_add(1)
            .ok_or_else(|| SemverError::NumericOverflow {
                input: self.text.to_string(),
                position: 0,
                component: CORE_COMPONENTS[index],
            })?;
        for part in parts.iter_mut().skip(index + 1) {
            *part = 0;
        }
        Ok(Version::new(parts[0], parts[1], parts[2]))
    }

    /// First version past everything the operand stands for, e.g. `1.2` -> `1.3.0`
    fn ceiling(&self) -> Result<Version, SemverError> {
        self.bump(self.given().saturating_sub(1))
    }
}

fn compare(operator: Operator, version: Version) -> Box<dyn ConstraintInterface> {
    Box::new(Constraint::new(operator, version))
}

fn match_all() -> Box<dyn ConstraintInterface> {
    Box::new(MatchAllConstraint::new())
}

fn match_none() -> Box<dyn ConstraintInterface> {
    Box::new(MatchNoneConstraint::new())
}

fn malformed(range: &str, reason: impl Into<String>) -> SemverError {
    SemverError::MalformedRangeClause {
        range: range.to_string(),
        reason: reason.into(),
    }
}

/// Parser for version strings and version ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    /// Create a new version parser
    pub fn new() -> Self {
        VersionParser
    }

    /// Check if a version string is valid
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }

    /// Parse a strict `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` string
    ///
    /// Nothing is normalized: a `v` prefix or surrounding whitespace is an error.
    pub fn parse(&self, version: &str) -> Result<Version, SemverError> {
        let mut scanner = Scanner::new(version);

        let major = scanner.numeric(Component::Major)?;
        scanner.separator(Component::Major, Component::Minor)?;
        let minor = scanner.numeric(Component::Minor)?;
        scanner.separator(Component::Minor, Component::Patch)?;
        let patch = scanner.numeric(Component::Patch)?;

        let pre = if scanner.eat(b'-') {
            scanner.prerelease(true)?
        } else {
            Vec::new()
        };

        let build = if scanner.eat(b'+') {
            scanner
                .identifiers(Component::Build, false)?
                .into_iter()
                .map(|(_, text)| text.to_string())
                .collect()
        } else {
            Vec::new()
        };

        if scanner.pos < version.len() {
            return Err(SemverError::TrailingInput {
                input: version.to_string(),
                position: scanner.pos,
                rest: version[scanner.pos..].to_string(),
            });
        }

        Ok(Version::from_parts(major, minor, patch, pre, build))
    }

    /// Validate a dot separated prerelease label such as `beta` or `rc.1`
    pub fn parse_identifiers(&self, label: &str) -> Result<Vec<Identifier>, SemverError> {
        Scanner::new(label).prerelease(false)
    }

    /// Parse a range expression such as `^1.2.3 || >=2.0.0 <2.4.0`
    ///
    /// Groups separated by `||` are alternatives; clauses inside a group are
    /// separated by whitespace or commas and must all hold. Caret, tilde,
    /// hyphen and partial versions are expanded into plain comparator clauses
    /// here, so evaluation only ever compares versions.
    pub fn parse_range(&self, range: &str) -> Result<Range, SemverError> {
        let trimmed = range.trim();
        if trimmed.is_empty() {
            return Err(malformed(range, "empty range"));
        }

        let or_groups: Vec<&str> = OR_CONSTRAINT_RE.split(trimmed).collect();
        if or_groups.first().map_or(false, |g| g.is_empty()) {
            return Err(malformed(range, "leading operator \"||\""));
        }
        if or_groups.last().map_or(false, |g| g.is_empty()) {
            return Err(malformed(range, "trailing operator \"||\""));
        }

        let mut groups = Vec::with_capacity(or_groups.len());
        for group in or_groups {
            if group.is_empty() {
                return Err(malformed(range, "empty alternative between \"||\" operators"));
            }
            let clauses = self.parse_group(range, group)?;
            groups.push(MultiConstraint::create(clauses, true));
        }

        Ok(Range::new(range.to_string(), MultiConstraint::create(groups, false)))
    }

    fn parse_group(&self, range: &str, group: &str) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        let mut clauses = Vec::new();
        for part in AND_CONSTRAINT_RE.split(group) {
            let tokens: Vec<&str> = part.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(malformed(range, "missing clause next to \",\""));
            }
            clauses.extend(self.parse_clauses(range, &tokens)?);
        }

        Ok(clauses)
    }

    fn parse_clauses(&self, range: &str, tokens: &[&str]) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        let mut clauses = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];

            if tokens.get(i + 1) == Some(&"-") {
                let upper = tokens.get(i + 2).ok_or_else(|| {
                    malformed(range, format!("hyphen range \"{} -\" has no upper bound", token))
                })?;
                clauses.extend(self.parse_hyphen(range, token, upper)?);
                i += 3;
                continue;
            }

            if token == "-" {
                return Err(malformed(range, "hyphen range has no lower bound"));
            }

            let (operator, operand) = split_operator(token);
            if operand.is_empty() {
                // Operator separated from its version by whitespace, e.g. ">= 1.2.3"
                let next = tokens.get(i + 1).ok_or_else(|| {
                    malformed(range, format!("operator \"{}\" is not followed by a version", operator))
                })?;
                clauses.extend(self.parse_clause(range, operator, next)?);
                i += 2;
            } else {
                clauses.extend(self.parse_clause(range, operator, operand)?);
                i += 1;
            }
        }

        Ok(clauses)
    }

    fn parse_clause(
        &self,
        range: &str,
        operator: &str,
        operand: &str,
    ) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        if !matches!(operator, "" | "=" | "<" | "<=" | ">" | ">=" | "^" | "~") {
            return Err(SemverError::UnknownOperator {
                range: range.to_string(),
                operator: operator.to_string(),
            });
        }

        let partial = self.parse_partial(range, operand)?;

        match operator {
            "^" => self.parse_caret_constraint(&partial),
            "~" => self.parse_tilde_constraint(&partial),
            "" | "=" => self.parse_exact_constraint(&partial),
            ">" => {
                if partial.is_any() {
                    Ok(vec![match_none()])
                } else if partial.is_full() {
                    Ok(vec![compare(Operator::GreaterThan, partial.floor())])
                } else {
                    Ok(vec![compare(Operator::GreaterThanOrEqual, partial.ceiling()?)])
                }
            }
            ">=" => {
                if partial.is_any() {
                    Ok(vec![match_all()])
                } else {
                    Ok(vec![compare(Operator::GreaterThanOrEqual, partial.floor())])
                }
            }
            "<" => {
                if partial.is_any() {
                    Ok(vec![match_none()])
                } else {
                    Ok(vec![compare(Operator::LessThan, partial.floor())])
                }
            }
            _ => {
                if partial.is_any() {
                    Ok(vec![match_all()])
                } else if partial.is_full() {
                    Ok(vec![compare(Operator::LessThanOrEqual, partial.floor())])
                } else {
                    Ok(vec![compare(Operator::LessThan, partial.ceiling()?)])
                }
            }
        }
    }

    fn parse_exact_constraint(&self, partial: &Partial) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        if partial.is_any() {
            return Ok(vec![match_all()]);
        }
        if partial.is_full() {
            return Ok(vec![compare(Operator::Equal, partial.floor())]);
        }
        Ok(vec![
            compare(Operator::GreaterThanOrEqual, partial.floor()),
            compare(Operator::LessThan, partial.ceiling()?),
        ])
    }

    fn parse_caret_constraint(&self, partial: &Partial) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        if partial.is_any() {
            return Ok(vec![match_all()]);
        }

        // Hold the leftmost non-zero component fixed; a trailing given zero
        // is held fixed as well when nothing follows it.
        let position = match partial.parts {
            [Some(major), _, _] if major != 0 => 0,
            [_, None, _] => 0,
            [_, Some(minor), _] if minor != 0 => 1,
            [_, _, None] => 1,
            _ => 2,
        };

        Ok(vec![
            compare(Operator::GreaterThanOrEqual, partial.floor()),
            compare(Operator::LessThan, partial.bump(position)?),
        ])
    }

    fn parse_tilde_constraint(&self, partial: &Partial) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        if partial.is_any() {
            return Ok(vec![match_all()]);
        }

        let position = if partial.given() >= 2 { 1 } else { 0 };

        Ok(vec![
            compare(Operator::GreaterThanOrEqual, partial.floor()),
            compare(Operator::LessThan, partial.bump(position)?),
        ])
    }

    fn parse_hyphen(
        &self,
        range: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<Box<dyn ConstraintInterface>>, SemverError> {
        for bound in [from, to] {
            let (operator, _) = split_operator(bound);
            if !operator.is_empty() {
                return Err(malformed(
                    range,
                    format!("hyphen range bound \"{}\" cannot carry an operator", bound),
                ));
            }
        }

        let from = self.parse_partial(range, from)?;
        let to = self.parse_partial(range, to)?;

        let mut constraints = Vec::with_capacity(2);
        if !from.is_any() {
            constraints.push(compare(Operator::GreaterThanOrEqual, from.floor()));
        }
        if to.is_full() {
            constraints.push(compare(Operator::LessThanOrEqual, to.floor()));
        } else if !to.is_any() {
            constraints.push(compare(Operator::LessThan, to.ceiling()?));
        }

        if constraints.is_empty() {
            constraints.push(match_all());
        }
        Ok(constraints)
    }

    fn parse_partial<'a>(&self, range: &str, text: &'a str) -> Result<Partial<'a>, SemverError> {
        if text.is_empty() {
            return Err(malformed(range, "missing version"));
        }

        let core_end = text.find(|c: char| c == '-' || c == '+').unwrap_or(text.len());
        let parts: Vec<&str> = text[..core_end].split('.').collect();
        let has_wildcard = parts.iter().any(|p| is_wildcard(p));

        if !has_wildcard && parts.len() >= 3 {
            let version = self.parse(text)?;
            return Ok(Partial {
                text,
                parts: [Some(version.major()), Some(version.minor()), Some(version.patch())],
                pre: version.pre().to_vec(),
            });
        }

        if core_end < text.len() {
            return Err(malformed(
                range,
                format!("\"{}\" has a prerelease or build but is not a complete version", text),
            ));
        }
        if parts.len() > 3 {
            return Err(malformed(range, format!("\"{}\" has more than three components", text)));
        }

        let mut values = [None; 3];
        let mut offset = 0;
        let mut seen_wildcard = false;
        for (index, part) in parts.iter().enumerate() {
            if is_wildcard(part) {
                seen_wildcard = true;
            } else if seen_wildcard {
                return Err(malformed(
                    range,
                    format!("wildcard in \"{}\" is followed by a number", text),
                ));
            } else {
                let mut scanner = Scanner::at(text, offset);
                let value = scanner.numeric(CORE_COMPONENTS[index])?;
                if scanner.pos != offset + part.len() {
                    return Err(scanner.core_error(scanner.pos, CORE_COMPONENTS[index], Defect::NotNumeric));
                }
                values[index] = Some(value);
            }
            offset += part.len() + 1;
        }

        Ok(Partial {
            text,
            parts: values,
            pre: Vec::new(),
        })
    }
}

fn split_operator(token: &str) -> (&str, &str) {
    match CLAUSE_OPERATOR_RE.captures(token) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => ("", token),
    }
}
